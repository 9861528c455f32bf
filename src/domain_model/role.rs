use serde::{Deserialize, Deserializer, Serialize};

/// Marketplace roles a user can request on the role-selection surface.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Wholesaler,
    Seller,
}

/// Approval state of a requested role.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleStatus {
    NotRequested,
    Pending,
    Approved,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RoleApproval {
    pub status: RoleStatus,
    pub role: Option<Role>,
}

/// Role-status endpoint response as it arrives. The endpoint has grown
/// several shapes over time: a canonical `status` field (possibly an explicit
/// null), an older boolean `approved` flag, and a `role` that may sit at the
/// top level or under `data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRoleStatus {
    #[serde(default, deserialize_with = "nullable")]
    pub status: Option<Option<RoleStatus>>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub data: Option<RawRoleData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRoleData {
    #[serde(default)]
    pub role: Option<Role>,
}

// Keeps "key absent" (outer None) distinct from "explicit null" (inner None).
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Collapse the historical response shapes into one `{status, role}` pair.
///
/// The resolution order is a compatibility rule, not a preference: a present
/// non-null `status` always wins, the `approved` flag is consulted next, an
/// explicit `status: null` reads as not-requested, and everything else is a
/// request still in flight.
pub fn normalize(raw: &RawRoleStatus) -> RoleApproval {
    let role = raw.role.or_else(|| raw.data.as_ref().and_then(|d| d.role));
    let status = match raw.status {
        Some(Some(status)) => status,
        _ if raw.approved => RoleStatus::Approved,
        Some(None) => RoleStatus::NotRequested,
        None => RoleStatus::Pending,
    };
    RoleApproval { status, role }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> RawRoleStatus {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn explicit_status_wins_over_approved_flag() {
        let raw = parse(json!({"status": "pending", "approved": true, "role": "seller"}));
        let approval = normalize(&raw);
        assert_eq!(approval.status, RoleStatus::Pending);
        assert_eq!(approval.role, Some(Role::Seller));
    }

    #[test]
    fn approved_flag_applies_when_status_missing() {
        let raw = parse(json!({"approved": true}));
        assert_eq!(normalize(&raw).status, RoleStatus::Approved);
    }

    #[test]
    fn approved_flag_applies_even_on_explicit_null_status() {
        let raw = parse(json!({"status": null, "approved": true}));
        assert_eq!(normalize(&raw).status, RoleStatus::Approved);
    }

    #[test]
    fn explicit_null_status_reads_as_not_requested() {
        let raw = parse(json!({"status": null, "approved": false}));
        assert_eq!(normalize(&raw).status, RoleStatus::NotRequested);
    }

    #[test]
    fn absent_status_defaults_to_pending() {
        let raw = parse(json!({"role": "wholesaler"}));
        let approval = normalize(&raw);
        assert_eq!(approval.status, RoleStatus::Pending);
        assert_eq!(approval.role, Some(Role::Wholesaler));
    }

    #[test]
    fn role_falls_back_to_data_envelope() {
        let raw = parse(json!({"status": "approved", "data": {"role": "wholesaler"}}));
        assert_eq!(normalize(&raw).role, Some(Role::Wholesaler));
    }

    #[test]
    fn top_level_role_wins_over_envelope() {
        let raw = parse(json!({"status": "approved", "role": "seller", "data": {"role": "wholesaler"}}));
        assert_eq!(normalize(&raw).role, Some(Role::Seller));
    }

    #[test]
    fn empty_response_is_pending_without_role() {
        let approval = normalize(&parse(json!({})));
        assert_eq!(approval.status, RoleStatus::Pending);
        assert_eq!(approval.role, None);
    }
}
