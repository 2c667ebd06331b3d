//! Condition merging for manifest set statuses
//!
//! Conditions are merged, never overwritten wholesale: an incoming
//! condition either appends under a new type or updates the entry that
//! already carries its type. The transition timestamp is treated as a
//! materialized marker of the last real status flip, so a merge that
//! leaves the status value unchanged keeps the stored timestamp exactly,
//! no matter what the incoming condition carries.

use chrono::Utc;

use stratus_api::{ConditionStatus, ManifestCondition, StatusCondition};

/// Insert or update a condition in a list, keyed by condition type.
///
/// A type not present in the list appends the condition unchanged. When the
/// type is present and the status value differs, the entry adopts the new
/// status, reason, and message; its transition time becomes the incoming
/// one when the caller supplied one, otherwise the current instant. When
/// the status value is unchanged only reason and message are updated, and
/// the stored transition time is preserved even if the incoming condition
/// carries a later timestamp.
pub fn set_status_condition(conditions: &mut Vec<StatusCondition>, new_condition: StatusCondition) {
    let Some(existing) = conditions
        .iter_mut()
        .find(|c| c.condition_type == new_condition.condition_type)
    else {
        conditions.push(new_condition);
        return;
    };

    if existing.status != new_condition.status {
        existing.status = new_condition.status;
        existing.last_transition_time = new_condition
            .last_transition_time
            .or_else(|| Some(Utc::now()));
    }

    existing.reason = new_condition.reason;
    existing.message = new_condition.message;
}

/// Merge a batch of conditions, left to right.
pub fn merge_status_conditions(
    conditions: &mut Vec<StatusCondition>,
    new_conditions: Vec<StatusCondition>,
) {
    for condition in new_conditions {
        set_status_condition(conditions, condition);
    }
}

/// Find a condition by type.
pub fn find_status_condition<'a>(
    conditions: &'a [StatusCondition],
    condition_type: &str,
) -> Option<&'a StatusCondition> {
    conditions.iter().find(|c| c.condition_type == condition_type)
}

/// Remove a condition by type; returns whether an entry was removed.
pub fn remove_status_condition(conditions: &mut Vec<StatusCondition>, condition_type: &str) -> bool {
    let before = conditions.len();
    conditions.retain(|c| c.condition_type != condition_type);
    conditions.len() != before
}

/// Check whether a condition is present with status True.
pub fn is_status_condition_true(conditions: &[StatusCondition], condition_type: &str) -> bool {
    is_status_condition_present_and_equal(conditions, condition_type, ConditionStatus::True)
}

/// Check whether a condition is present with status False.
pub fn is_status_condition_false(conditions: &[StatusCondition], condition_type: &str) -> bool {
    is_status_condition_present_and_equal(conditions, condition_type, ConditionStatus::False)
}

/// Check whether a condition is present with the given status.
pub fn is_status_condition_present_and_equal(
    conditions: &[StatusCondition],
    condition_type: &str,
    status: ConditionStatus,
) -> bool {
    find_status_condition(conditions, condition_type)
        .map(|c| c.status == status)
        .unwrap_or(false)
}

/// Insert or replace a per-manifest condition entry.
///
/// The ordinal locates the slot: an entry carrying the same ordinal is
/// replaced in place, resource meta and inner condition list included,
/// and an unseen ordinal appends. There is no recursive per-condition
/// merge; callers pre-merge the inner list (via [`set_status_condition`])
/// before constructing the new entry.
pub fn set_manifest_condition(
    manifests: &mut Vec<ManifestCondition>,
    new_condition: ManifestCondition,
) {
    match manifests
        .iter_mut()
        .find(|m| m.resource_meta.ordinal == new_condition.resource_meta.ordinal)
    {
        Some(existing) => *existing = new_condition,
        None => manifests.push(new_condition),
    }
}

/// Find a per-manifest condition entry by ordinal.
pub fn find_manifest_condition(
    manifests: &[ManifestCondition],
    ordinal: i32,
) -> Option<&ManifestCondition> {
    manifests.iter().find(|m| m.resource_meta.ordinal == ordinal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use stratus_api::ManifestResourceMeta;

    fn new_condition(
        name: &str,
        status: ConditionStatus,
        reason: &str,
        message: &str,
        time: Option<DateTime<Utc>>,
    ) -> StatusCondition {
        StatusCondition {
            condition_type: name.to_string(),
            status,
            last_transition_time: time,
            reason: reason.to_string(),
            message: message.to_string(),
        }
    }

    fn new_manifest_condition(
        ordinal: i32,
        resource: &str,
        conditions: Vec<StatusCondition>,
    ) -> ManifestCondition {
        ManifestCondition {
            resource_meta: ManifestResourceMeta {
                ordinal,
                resource: resource.to_string(),
                ..Default::default()
            },
            conditions,
        }
    }

    #[test]
    fn set_condition_appends_to_empty_list() {
        let mut conditions = vec![];
        let condition = new_condition("test", ConditionStatus::True, "my-reason", "my-message", None);

        set_status_condition(&mut conditions, condition.clone());

        assert_eq!(conditions, vec![condition]);
    }

    #[test]
    fn set_condition_appends_new_type_preserving_existing() {
        let existing = new_condition("two", ConditionStatus::True, "my-reason", "my-message", None);
        let mut conditions = vec![existing.clone()];

        set_status_condition(
            &mut conditions,
            new_condition("one", ConditionStatus::True, "my-reason", "my-message", None),
        );

        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0], existing);
        assert_eq!(conditions[1].condition_type, "one");
    }

    #[test]
    fn set_condition_replaces_on_status_change() {
        let t0 = Utc::now() - Duration::seconds(30);
        let mut conditions = vec![
            new_condition("two", ConditionStatus::True, "my-reason", "my-message", None),
            new_condition("one", ConditionStatus::True, "my-reason", "my-message", Some(t0)),
        ];

        set_status_condition(
            &mut conditions,
            new_condition(
                "one",
                ConditionStatus::False,
                "my-different-reason",
                "my-other-message",
                None,
            ),
        );

        assert_eq!(conditions.len(), 2);
        let updated = &conditions[1];
        assert_eq!(updated.status, ConditionStatus::False);
        assert_eq!(updated.reason, "my-different-reason");
        assert_eq!(updated.message, "my-other-message");
        // The flip materialized a fresh transition time.
        let time = updated.last_transition_time.expect("transition time set");
        assert!(time > t0);
    }

    #[test]
    fn set_condition_uses_supplied_time_on_status_change() {
        let t0 = Utc::now() - Duration::seconds(30);
        let supplied = Utc::now() - Duration::seconds(5);
        let mut conditions = vec![new_condition(
            "one",
            ConditionStatus::True,
            "my-reason",
            "my-message",
            Some(t0),
        )];

        set_status_condition(
            &mut conditions,
            new_condition("one", ConditionStatus::False, "r", "m", Some(supplied)),
        );

        assert_eq!(conditions[0].last_transition_time, Some(supplied));
    }

    #[test]
    fn set_condition_keeps_stored_time_when_status_unchanged() {
        let t0 = Utc::now() - Duration::seconds(10);
        let later = t0 + Duration::seconds(20);
        let mut conditions = vec![
            new_condition("two", ConditionStatus::True, "my-reason", "my-message", None),
            new_condition("one", ConditionStatus::True, "my-reason", "my-message", Some(t0)),
        ];
        let before = conditions.clone();

        // Same status with a later timestamp: the stored time must not jump.
        set_status_condition(
            &mut conditions,
            new_condition("one", ConditionStatus::True, "my-reason", "my-message", Some(later)),
        );

        assert_eq!(conditions, before);
    }

    #[test]
    fn set_condition_updates_reason_and_message_in_place() {
        let t0 = Utc::now() - Duration::seconds(10);
        let mut conditions = vec![new_condition(
            "one",
            ConditionStatus::True,
            "my-reason",
            "my-message",
            Some(t0),
        )];

        set_status_condition(
            &mut conditions,
            new_condition("one", ConditionStatus::True, "new-reason", "new-message", None),
        );

        assert_eq!(conditions[0].reason, "new-reason");
        assert_eq!(conditions[0].message, "new-message");
        assert_eq!(conditions[0].last_transition_time, Some(t0));
    }

    #[test]
    fn merge_conditions_folds_left_to_right() {
        let mut conditions = vec![new_condition(
            "one",
            ConditionStatus::True,
            "my-reason",
            "my-message",
            None,
        )];

        merge_status_conditions(
            &mut conditions,
            vec![
                new_condition("one", ConditionStatus::True, "updated", "updated", None),
                new_condition("two", ConditionStatus::False, "r", "m", None),
            ],
        );

        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0].reason, "updated");
        assert_eq!(conditions[1].condition_type, "two");
    }

    #[test]
    fn find_and_query_helpers() {
        let conditions = vec![
            new_condition("one", ConditionStatus::True, "r", "m", None),
            new_condition("two", ConditionStatus::False, "r", "m", None),
        ];

        assert!(find_status_condition(&conditions, "one").is_some());
        assert!(find_status_condition(&conditions, "missing").is_none());

        assert!(is_status_condition_true(&conditions, "one"));
        assert!(!is_status_condition_true(&conditions, "two"));
        assert!(is_status_condition_false(&conditions, "two"));
        assert!(is_status_condition_present_and_equal(
            &conditions,
            "two",
            ConditionStatus::False
        ));
        // Absent conditions are never equal to anything.
        assert!(!is_status_condition_present_and_equal(
            &conditions,
            "missing",
            ConditionStatus::Unknown
        ));
    }

    #[test]
    fn remove_condition_by_type() {
        let mut conditions = vec![
            new_condition("one", ConditionStatus::True, "r", "m", None),
            new_condition("two", ConditionStatus::False, "r", "m", None),
        ];

        assert!(remove_status_condition(&mut conditions, "one"));
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].condition_type, "two");

        assert!(!remove_status_condition(&mut conditions, "one"));
        assert_eq!(conditions.len(), 1);
    }

    #[test]
    fn set_manifest_condition_appends_to_empty_list() {
        let mut manifests = vec![];
        let entry = new_manifest_condition(
            0,
            "resource1",
            vec![new_condition("one", ConditionStatus::True, "my-reason", "my-message", None)],
        );

        set_manifest_condition(&mut manifests, entry.clone());

        assert_eq!(manifests, vec![entry]);
    }

    #[test]
    fn set_manifest_condition_appends_unseen_ordinal() {
        let first = new_manifest_condition(
            0,
            "resource1",
            vec![new_condition("one", ConditionStatus::True, "my-reason", "my-message", None)],
        );
        let mut manifests = vec![first.clone()];

        let second = new_manifest_condition(
            1,
            "resource1",
            vec![new_condition("one", ConditionStatus::True, "my-reason", "my-message", None)],
        );
        set_manifest_condition(&mut manifests, second.clone());

        assert_eq!(manifests, vec![first, second]);
    }

    #[test]
    fn set_manifest_condition_replaces_matching_ordinal_in_place() {
        let mut manifests = vec![
            new_manifest_condition(
                2,
                "resource1",
                vec![new_condition("one", ConditionStatus::True, "my-reason", "my-message", None)],
            ),
            new_manifest_condition(
                1,
                "resource1",
                vec![new_condition("one", ConditionStatus::True, "my-reason", "my-message", None)],
            ),
        ];

        // Ordinal 1 is taken: the whole entry is replaced at its position,
        // the new resource identifier travelling with it.
        let replacement = new_manifest_condition(
            1,
            "resource2",
            vec![new_condition("two", ConditionStatus::True, "my-reason", "my-message", None)],
        );
        set_manifest_condition(&mut manifests, replacement.clone());

        assert_eq!(manifests.len(), 2);
        assert_eq!(manifests[0].resource_meta.ordinal, 2);
        assert_eq!(manifests[0].resource_meta.resource, "resource1");
        assert_eq!(manifests[1], replacement);
    }

    #[test]
    fn find_manifest_condition_by_ordinal() {
        let manifests = vec![
            new_manifest_condition(2, "resource1", vec![]),
            new_manifest_condition(1, "resource1", vec![]),
        ];

        assert_eq!(
            find_manifest_condition(&manifests, 1).map(|m| m.resource_meta.ordinal),
            Some(1)
        );
        assert!(find_manifest_condition(&manifests, 5).is_none());
    }
}
