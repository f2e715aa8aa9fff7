// checkin-service/src/models/member.rs
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

// The four independent per-member flags
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberStatus {
    #[serde(default, serialize_with = "flag_as_int", deserialize_with = "lenient_flag")]
    pub check_in: bool,
    #[serde(default, serialize_with = "flag_as_int", deserialize_with = "lenient_flag")]
    pub check_out: bool,
    #[serde(default, serialize_with = "flag_as_int", deserialize_with = "lenient_flag")]
    pub snacks: bool,
    #[serde(default, serialize_with = "flag_as_int", deserialize_with = "lenient_flag")]
    pub dinner: bool,
}

// Member row as stored in the `members` table
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Member {
    pub member_id: i64,
    pub team_id: String,
    pub member_name: String,
    #[serde(flatten)]
    pub status: MemberStatus,
}

// One entry of an `update_members` batch
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MemberUpdate {
    #[serde(deserialize_with = "lenient_id")]
    pub member_id: i64,
    #[serde(flatten)]
    pub status: MemberStatus,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct UpdateMembersRequest {
    #[serde(default)]
    pub members: Vec<MemberUpdate>,
}

fn flag_as_int<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*flag))
}

// Accepts 0/1, true/false, "0"/"1"/"true" and null
fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(i != 0),
            (None, Some(f)) => Ok(f != 0.0),
            _ => Err(de::Error::custom("invalid status flag")),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" | "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            other => Err(de::Error::custom(format!("invalid status flag: {}", other))),
        },
        other => Err(de::Error::custom(format!("invalid status flag: {}", other))),
    }
}

// The dashboard sends ids read from DOM attributes, so strings are common
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("invalid member_id: {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("invalid member_id: {}", s))),
        other => Err(de::Error::custom(format!("invalid member_id: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_accepts_dashboard_shapes() {
        let update: MemberUpdate = serde_json::from_value(json!({
            "member_id": "7",
            "check_in": 1,
            "snacks": true,
            "dinner": "0",
            "check_out": null
        }))
        .unwrap();

        assert_eq!(update.member_id, 7);
        assert_eq!(
            update.status,
            MemberStatus { check_in: true, check_out: false, snacks: true, dinner: false }
        );
    }

    #[test]
    fn missing_flags_default_to_false() {
        let update: MemberUpdate = serde_json::from_value(json!({ "member_id": 3, "dinner": 1 })).unwrap();
        assert_eq!(update.status, MemberStatus { dinner: true, ..MemberStatus::default() });
    }

    #[test]
    fn bad_member_id_is_rejected() {
        assert!(serde_json::from_value::<MemberUpdate>(json!({ "member_id": "abc" })).is_err());
        assert!(serde_json::from_value::<MemberUpdate>(json!({ "check_in": 1 })).is_err());
        assert!(serde_json::from_value::<MemberUpdate>(json!({ "member_id": [1] })).is_err());
    }

    #[test]
    fn member_serializes_flags_as_integers() {
        let member = Member {
            member_id: 1,
            team_id: "t".to_string(),
            member_name: "A".to_string(),
            status: MemberStatus { check_in: true, ..MemberStatus::default() },
        };

        let value = serde_json::to_value(&member).unwrap();
        assert_eq!(
            value,
            json!({
                "member_id": 1,
                "team_id": "t",
                "member_name": "A",
                "check_in": 1,
                "check_out": 0,
                "snacks": 0,
                "dinner": 0
            })
        );
    }
}
