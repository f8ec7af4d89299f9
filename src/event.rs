use serde::{Deserialize, Deserializer};
use serde_json::Value;

const DEFAULT_ROOT_DEVICE_TYPE: &str = "ebs";
const DEFAULT_VIRTUALIZATION_TYPE: &str = "hvm";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// A CloudFormation custom resource request for a `FindAmi` resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleEvent {
    pub request_type: RequestType,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(default)]
    pub resource_properties: ImageProperties,
}

/// The `ResourceProperties` of a `FindAmi` resource.
///
/// CloudFormation hands every property over as a string. Anything else is
/// treated as unset, and so is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageProperties {
    #[serde(deserialize_with = "non_empty_string")]
    pub region: Option<String>,
    #[serde(deserialize_with = "non_empty_string")]
    pub debug: Option<String>,
    #[serde(deserialize_with = "non_empty_string")]
    pub architecture: Option<String>,
    #[serde(deserialize_with = "non_empty_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "non_empty_string")]
    pub owner_id: Option<String>,
    #[serde(deserialize_with = "non_empty_string")]
    pub root_device_type: Option<String>,
    #[serde(deserialize_with = "non_empty_string")]
    pub virtualization_type: Option<String>,
}

impl ImageProperties {
    /// Verbose logging is requested with the literal string `"true"` only.
    pub fn debug_enabled(&self) -> bool {
        self.debug.as_deref() == Some("true")
    }

    pub fn root_device_type(&self) -> &str {
        self.root_device_type
            .as_deref()
            .unwrap_or(DEFAULT_ROOT_DEVICE_TYPE)
    }

    pub fn virtualization_type(&self) -> &str {
        self.virtualization_type
            .as_deref()
            .unwrap_or(DEFAULT_VIRTUALIZATION_TYPE)
    }
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use crate::event::{ImageProperties, LifecycleEvent, RequestType};
    use serde_json::json;

    #[test]
    fn test_deserialize_create_event() {
        let event: LifecycleEvent = serde_json::from_value(json!({
            "RequestType": "Create",
            "ResponseURL": "https://cloudformation-custom-resource-response.s3.amazonaws.com/abc",
            "StackId": "arn:aws:cloudformation:us-west-2:123456789012:stack/stack-name/guid",
            "RequestId": "unique id for this create request",
            "ResourceType": "Custom::FindAmi",
            "LogicalResourceId": "LatestAmi",
            "ResourceProperties": {
                "ServiceToken": "arn:aws:lambda:us-west-2:123456789012:function:find-ami",
                "Region": "us-west-2",
                "Architecture": "x86_64",
                "OwnerId": "123456789012"
            }
        }))
        .unwrap();

        assert_eq!(event.request_type, RequestType::Create);
        assert_eq!(event.logical_resource_id, "LatestAmi");
        assert_eq!(
            event.resource_properties,
            ImageProperties {
                region: Some("us-west-2".to_string()),
                architecture: Some("x86_64".to_string()),
                owner_id: Some("123456789012".to_string()),
                ..ImageProperties::default()
            }
        );
    }

    #[test]
    fn test_deserialize_delete_event_without_properties() {
        let event: LifecycleEvent = serde_json::from_value(json!({
            "RequestType": "Delete",
            "ResponseURL": "http://localhost/response",
            "StackId": "stack",
            "RequestId": "request",
            "LogicalResourceId": "LatestAmi"
        }))
        .unwrap();

        assert_eq!(event.request_type, RequestType::Delete);
        assert_eq!(event.resource_properties, ImageProperties::default());
    }

    #[test]
    fn test_defaults() {
        let properties: ImageProperties = serde_json::from_value(json!({
            "Region": "eu-west-1",
            "RootDeviceType": ""
        }))
        .unwrap();

        assert_eq!(properties.root_device_type(), "ebs");
        assert_eq!(properties.virtualization_type(), "hvm");
        assert!(!properties.debug_enabled());
    }

    #[test]
    fn test_non_string_values_are_unset() {
        let properties: ImageProperties = serde_json::from_value(json!({
            "Region": 42,
            "Name": ["amzn2-ami-hvm-*"],
            "Debug": true,
            "VirtualizationType": "paravirtual"
        }))
        .unwrap();

        assert_eq!(properties.region, None);
        assert_eq!(properties.name, None);
        assert!(!properties.debug_enabled());
        assert_eq!(properties.virtualization_type(), "paravirtual");
    }

    #[test]
    fn test_debug_only_for_literal_true() {
        let enabled: ImageProperties = serde_json::from_value(json!({ "Debug": "true" })).unwrap();
        let disabled: ImageProperties = serde_json::from_value(json!({ "Debug": "True" })).unwrap();

        assert!(enabled.debug_enabled());
        assert!(!disabled.debug_enabled());
    }
}
