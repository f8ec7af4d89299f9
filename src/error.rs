use std::error::Error;

use crate::image_filter::FilterSet;
use rusoto_core::RusotoError;
use rusoto_ec2::DescribeImagesError;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum FindAmiError {
    NoneValue,
    MissingRegion,
    DescribeImages(RusotoError<DescribeImagesError>),
    NoImageFound(FilterSet),
}

impl Display for FindAmiError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            FindAmiError::NoneValue => write!(f, "Value is None"),
            FindAmiError::MissingRegion => {
                write!(f, "'Region' must be set in the request's ResourceProperties")
            }
            FindAmiError::DescribeImages(ref error) => std::fmt::Display::fmt(error, f),
            FindAmiError::NoImageFound(ref filters) => {
                write!(f, "No image found for filters: {}", filters)
            }
        }
    }
}

impl Error for FindAmiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            FindAmiError::DescribeImages(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<RusotoError<DescribeImagesError>> for FindAmiError {
    fn from(e: RusotoError<DescribeImagesError>) -> FindAmiError {
        FindAmiError::DescribeImages(e)
    }
}
