use rusoto_core::Region;
use std::str::FromStr;
use tracing::{error, info};

use crate::ec2_image_client::{latest_image, DescribeImages, MachineImage};
use crate::error::FindAmiError;
use crate::event::{ImageProperties, LifecycleEvent, RequestType};
use crate::image_filter::FilterSet;
use crate::response::{Responder, ResponsePayload};

/// Handles `FindAmi` custom resource requests.
///
/// Every call to [`FindAmiHandler::handle`] sends exactly one response, whatever
/// the outcome. `catalog` opens an image catalog for the requested region.
pub struct FindAmiHandler<F, R> {
    catalog: F,
    responder: R,
}

impl<F, C, R> FindAmiHandler<F, R>
where
    F: Fn(Region) -> C + Send + Sync,
    C: DescribeImages + Send + Sync,
    R: Responder + Send + Sync,
{
    pub fn new(catalog: F, responder: R) -> Self {
        FindAmiHandler { catalog, responder }
    }

    pub async fn handle(&self, event: &LifecycleEvent) -> ResponsePayload {
        info!("Request type is '{:?}'", event.request_type);

        let payload = match event.request_type {
            RequestType::Delete => {
                info!("Nothing to do for 'Delete'");
                ResponsePayload::success(event, "", None)
            }
            RequestType::Create | RequestType::Update => {
                match self.find_latest_image(&event.resource_properties).await {
                    Ok(image) => {
                        info!("Latest image: {} ({})", image.image_id, image.creation_date);
                        ResponsePayload::success(event, "Success", Some(image.into()))
                    }
                    Err(e) => {
                        error!("{}", e);
                        ResponsePayload::failed(event, &e.to_string())
                    }
                }
            }
        };

        if let Err(e) = self.responder.send(&event.response_url, &payload).await {
            error!("Failed to deliver {:?} response: {:#}", payload.status, e);
        }
        payload
    }

    async fn find_latest_image(
        &self,
        properties: &ImageProperties,
    ) -> Result<MachineImage, FindAmiError> {
        let region_name = properties
            .region
            .as_deref()
            .ok_or(FindAmiError::MissingRegion)?;
        let region = region_from_name(region_name);
        let filters = FilterSet::from(properties);

        if properties.debug_enabled() {
            info!("Requested debug: true");
            info!("Requested region: {}", region_name);
            info!("Requested architecture: {}", properties.architecture.as_deref().unwrap_or(""));
            info!("Requested name: {}", properties.name.as_deref().unwrap_or(""));
            info!("Requested owner id: {}", properties.owner_id.as_deref().unwrap_or(""));
            info!("Requested root device type: {}", properties.root_device_type());
            info!("Requested virtualization type: {}", properties.virtualization_type());
            info!("Filters: {}", filters);
        }

        let images = (self.catalog)(region).describe_images(&filters).await?;
        info!("DescribeImages succeeded; {} images found", images.len());

        latest_image(images).ok_or(FindAmiError::NoImageFound(filters))
    }
}

/// Resolves a region name, reaching regions newer than rusoto's `Region`
/// enum through their public EC2 endpoint.
fn region_from_name(name: &str) -> Region {
    Region::from_str(name).unwrap_or_else(|_| Region::Custom {
        name: name.to_string(),
        endpoint: format!("https://ec2.{}.amazonaws.com", name),
    })
}
