use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

/// Fields the gate cares about, sniffed out of a team-creation or team-join
/// request body. Everything else in the payload is left for the handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GatePayload {
    pub team_id: Option<Uuid>,
    pub name: Option<String>,
    pub bracket: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawGateFields {
    team_id: Option<String>,
    name: Option<String>,
    bracket: Option<String>,
}

impl GatePayload {
    /// Extracts gate fields from a JSON or url-encoded form body.
    ///
    /// Sniffing is deliberately tolerant: a malformed body, an unexpected
    /// content type, or wrongly-typed fields degrade to an empty payload and
    /// the checks then report whichever field is missing. The gate must never
    /// 500 on a body the downstream handler might still understand.
    pub fn sniff(content_type: Option<&str>, body: &[u8]) -> Self {
        let media_type = content_type
            .unwrap_or("")
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match media_type.as_str() {
            "application/json" => Self::from_json(body),
            "application/x-www-form-urlencoded" => Self::from_form(body),
            // No or unknown content type: try JSON first, then form fields.
            _ => {
                let payload = Self::from_json(body);
                if payload == Self::default() {
                    Self::from_form(body)
                } else {
                    payload
                }
            }
        }
    }

    fn from_json(body: &[u8]) -> Self {
        let Ok(value) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };

        let text_field = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self::from_fields(RawGateFields {
            team_id: text_field("team_id"),
            name: text_field("name"),
            bracket: text_field("bracket"),
        })
    }

    fn from_form(body: &[u8]) -> Self {
        let Ok(fields) = serde_urlencoded::from_bytes::<RawGateFields>(body) else {
            return Self::default();
        };

        Self::from_fields(fields)
    }

    fn from_fields(fields: RawGateFields) -> Self {
        let clean = |value: Option<String>| {
            value
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            team_id: clean(fields.team_id).and_then(|s| Uuid::parse_str(&s).ok()),
            name: clean(fields.name),
            bracket: clean(fields.bracket),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::GatePayload;
    use uuid::Uuid;

    #[test]
    fn sniffs_json_team_id_and_name() {
        let id = Uuid::new_v4();
        let body = format!(r#"{{"team_id":"{id}","name":"Rustaceans","invite_code":"x"}}"#);
        let payload = GatePayload::sniff(Some("application/json"), body.as_bytes());

        assert_eq!(payload.team_id, Some(id));
        assert_eq!(payload.name.as_deref(), Some("Rustaceans"));
    }

    #[test]
    fn sniffs_form_fields() {
        let payload = GatePayload::sniff(
            Some("application/x-www-form-urlencoded"),
            b"name=Night+Owls&bracket=Open",
        );

        assert_eq!(payload.team_id, None);
        assert_eq!(payload.name.as_deref(), Some("Night Owls"));
        assert_eq!(payload.bracket.as_deref(), Some("Open"));
    }

    #[test]
    fn json_content_type_with_parameters_still_parses() {
        let payload = GatePayload::sniff(
            Some("application/json; charset=utf-8"),
            br#"{"name":"Rustaceans"}"#,
        );

        assert_eq!(payload.name.as_deref(), Some("Rustaceans"));
    }

    #[test]
    fn malformed_body_degrades_to_empty_payload() {
        let payload = GatePayload::sniff(Some("application/json"), b"{not json");
        assert_eq!(payload, GatePayload::default());
    }

    #[test]
    fn wrongly_typed_json_fields_are_ignored() {
        let payload = GatePayload::sniff(
            Some("application/json"),
            br#"{"team_id":42,"name":["not","a","string"]}"#,
        );
        assert_eq!(payload, GatePayload::default());
    }

    #[test]
    fn invalid_uuid_is_dropped_not_fatal() {
        let payload = GatePayload::sniff(
            Some("application/json"),
            br#"{"team_id":"not-a-uuid","name":"Rustaceans"}"#,
        );
        assert_eq!(payload.team_id, None);
        assert_eq!(payload.name.as_deref(), Some("Rustaceans"));
    }

    #[test]
    fn missing_content_type_tries_json_then_form() {
        let from_json = GatePayload::sniff(None, br#"{"name":"Rustaceans"}"#);
        assert_eq!(from_json.name.as_deref(), Some("Rustaceans"));

        let from_form = GatePayload::sniff(None, b"name=Rustaceans");
        assert_eq!(from_form.name.as_deref(), Some("Rustaceans"));
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let payload = GatePayload::sniff(Some("application/json"), br#"{"name":"   "}"#);
        assert_eq!(payload.name, None);
    }
}
