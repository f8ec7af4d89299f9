use crate::event::ImageProperties;
use rusoto_ec2::Filter;
use std::fmt;
use std::fmt::{Display, Formatter};

pub const ARCHITECTURE: &str = "architecture";
pub const NAME: &str = "name";
pub const OWNER_ID: &str = "owner-id";
pub const ROOT_DEVICE_TYPE: &str = "root-device-type";
pub const VIRTUALIZATION_TYPE: &str = "virtualization-type";

#[derive(Debug, Clone, PartialEq)]
pub struct ImageFilter {
    pub name: &'static str,
    pub value: String,
}

/// Conjunction of `DescribeImages` filters, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    filters: Vec<ImageFilter>,
}

impl From<&ImageProperties> for FilterSet {
    fn from(properties: &ImageProperties) -> Self {
        let mut filters = FilterSet::default();
        filters.push_optional(ARCHITECTURE, properties.architecture.as_deref());
        filters.push_optional(NAME, properties.name.as_deref());
        filters.push_optional(OWNER_ID, properties.owner_id.as_deref());
        filters.push(ROOT_DEVICE_TYPE, properties.root_device_type());
        filters.push(VIRTUALIZATION_TYPE, properties.virtualization_type());
        filters
    }
}

impl FilterSet {
    fn push(&mut self, name: &'static str, value: &str) {
        self.filters.push(ImageFilter {
            name,
            value: value.to_string(),
        });
    }

    fn push_optional(&mut self, name: &'static str, value: Option<&str>) {
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            self.push(name, value);
        }
    }

    #[cfg(test)]
    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|filter| filter.name).collect()
    }

    pub fn to_ec2_filters(&self) -> Vec<Filter> {
        self.filters
            .iter()
            .map(|filter| Filter {
                name: Some(filter.name.to_string()),
                values: Some(vec![filter.value.clone()]),
            })
            .collect()
    }
}

impl Display for FilterSet {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", filter.name, filter.value)?;
        }
        write!(f, "]")
    }
}
