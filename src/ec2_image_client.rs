use async_trait::async_trait;
use rusoto_core::Region;
use rusoto_ec2::{Ec2, Ec2Client, Image};

use crate::error::FindAmiError;
use crate::image_filter::FilterSet;
use rusoto_ec2::DescribeImagesRequest;

pub struct Ec2ImageClient {
    client: Ec2Client,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MachineImage {
    pub image_id: String,
    pub name: String,
    pub description: String,
    pub creation_date: String,
}

impl MachineImage {
    fn try_from_image(image: Image) -> Result<Self, FindAmiError> {
        Ok(MachineImage {
            image_id: image.image_id.ok_or(FindAmiError::NoneValue)?,
            name: image.name.unwrap_or_default(),
            description: image.description.unwrap_or_default(),
            creation_date: image.creation_date.unwrap_or_default(),
        })
    }
}

#[async_trait]
pub trait DescribeImages {
    async fn describe_images(&self, filters: &FilterSet) -> Result<Vec<MachineImage>, FindAmiError>;
}

#[async_trait]
impl DescribeImages for Ec2ImageClient {
    async fn describe_images(&self, filters: &FilterSet) -> Result<Vec<MachineImage>, FindAmiError> {
        let request = DescribeImagesRequest {
            filters: Some(filters.to_ec2_filters()),
            ..DescribeImagesRequest::default()
        };

        let result = self.client.describe_images(request).await?;

        result
            .images
            .map_or(vec![], |images| images)
            .into_iter()
            .map(MachineImage::try_from_image)
            .collect()
    }
}

impl Ec2ImageClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(Ec2Client::new(region))
    }

    fn new_with_client(client: Ec2Client) -> Self {
        Ec2ImageClient { client }
    }
}

/// Picks the image with the greatest creation date.
///
/// Creation dates are ISO 8601 strings, so they compare chronologically as
/// plain strings. On a tie the image listed first wins.
pub fn latest_image(images: Vec<MachineImage>) -> Option<MachineImage> {
    images.into_iter().fold(None, |latest, image| match latest {
        Some(latest) if latest.creation_date >= image.creation_date => Some(latest),
        _ => Some(image),
    })
}
