//! RDAP domain object (RFC 9083), reduced to the fields we read.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Domain lookup response, or an RDAP error object
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdapDomain {
    pub object_class_name: Option<String>,
    pub ldh_name: Option<String>,
    pub handle: Option<String>,
    /// Present on error responses, e.g. `404`
    pub error_code: Option<u16>,
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default)]
    pub entities: Vec<RdapEntity>,
    #[serde(default)]
    pub events: Vec<RdapEvent>,
    #[serde(default)]
    pub nameservers: Vec<RdapNameserver>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RdapEntity {
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(rename = "vcardArray")]
    pub vcard_array: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RdapEvent {
    #[serde(rename = "eventAction", default)]
    pub event_action: String,
    #[serde(rename = "eventDate", default)]
    pub event_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RdapNameserver {
    #[serde(rename = "ldhName")]
    pub ldh_name: Option<String>,
}

impl RdapDomain {
    /// Interpret a JSON value as a domain object. Non-objects yield `None`.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Whether the object describes an existing registration
    pub fn has_registration_data(&self) -> bool {
        if self.error_code.is_some() {
            return false;
        }

        self.object_class_name
            .as_deref()
            .is_some_and(|class| class.eq_ignore_ascii_case("domain"))
            || self.ldh_name.is_some()
            || self.handle.is_some()
            || !self.status.is_empty()
            || !self.entities.is_empty()
            || !self.events.is_empty()
            || !self.nameservers.is_empty()
    }

    /// Registrar name from the entity vCard (`fn` property)
    pub fn registrar(&self) -> Option<String> {
        self.entities
            .iter()
            .find(|e| e.roles.iter().any(|role| role == "registrar"))
            .and_then(|e| e.vcard_array.as_ref())
            .and_then(|vcard| vcard.get(1))
            .and_then(|props| props.as_array())
            .and_then(|props| {
                props.iter().find(|prop| {
                    prop.get(0).and_then(|name| name.as_str()) == Some("fn")
                })
            })
            .and_then(|prop| prop.get(3))
            .and_then(|name| name.as_str())
            .map(|s| s.to_string())
    }

    /// Date of the `expiration` event, if parseable
    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.events
            .iter()
            .find(|e| e.event_action == "expiration")
            .and_then(|e| DateTime::parse_from_rfc3339(&e.event_date).ok())
            .map(|d| d.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registered_sample() -> serde_json::Value {
        json!({
            "objectClassName": "domain",
            "handle": "2138514_DOMAIN_COM-VRSN",
            "ldhName": "GOOGLE.COM",
            "status": ["client delete prohibited"],
            "entities": [{
                "objectClassName": "entity",
                "roles": ["registrar"],
                "vcardArray": ["vcard", [
                    ["version", {}, "text", "4.0"],
                    ["fn", {}, "text", "MarkMonitor Inc."]
                ]]
            }],
            "events": [
                {"eventAction": "registration", "eventDate": "1997-09-15T04:00:00Z"},
                {"eventAction": "expiration", "eventDate": "2028-09-14T04:00:00Z"}
            ],
            "nameservers": [{"objectClassName": "nameserver", "ldhName": "NS1.GOOGLE.COM"}]
        })
    }

    #[test]
    fn test_registered_object() {
        let domain = RdapDomain::from_value(&registered_sample()).unwrap();
        assert!(domain.has_registration_data());
        assert_eq!(domain.ldh_name.as_deref(), Some("GOOGLE.COM"));
        assert_eq!(domain.registrar().as_deref(), Some("MarkMonitor Inc."));
        assert_eq!(
            domain.expiration().unwrap().to_rfc3339(),
            "2028-09-14T04:00:00+00:00"
        );
    }

    #[test]
    fn test_error_object_is_not_registration() {
        let value = json!({"errorCode": 404, "title": "Not Found"});
        let domain = RdapDomain::from_value(&value).unwrap();
        assert_eq!(domain.error_code, Some(404));
        assert!(!domain.has_registration_data());
    }

    #[test]
    fn test_non_objects_rejected() {
        assert!(RdapDomain::from_value(&json!([1, 2, 3])).is_none());
        assert!(RdapDomain::from_value(&json!("registered")).is_none());
    }

    #[test]
    fn test_empty_object_has_no_data() {
        let domain = RdapDomain::from_value(&json!({})).unwrap();
        assert!(!domain.has_registration_data());
    }
}
