//! State — record-group tracking across one flush.
//!
//! The forward stream carries no nesting. A group opens with a marker record
//! holding both `resource` and `scope` keys, applies to every following
//! record, and closes with an empty record:
//!
//! ```text
//! {"resource": {...}, "scope": {...}}   -> group start, not forwarded
//! {"msg": "hello"}                      -> forwarded with context
//! {}                                    -> group end, not forwarded
//! ```
//!
//! Grouping is optional; records outside a group are forwarded with an empty
//! context.

use crate::value::DynamicMap;

const RESOURCE_KEY: &str = "resource";
const SCOPE_KEY: &str = "scope";

/// Resource and scope maps shared by the records of one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupContext {
    pub resource: Option<DynamicMap>,
    pub scope: Option<DynamicMap>,
}

impl GroupContext {
    pub fn is_empty(&self) -> bool {
        self.resource.is_none() && self.scope.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum GroupState {
    #[default]
    Idle,
    InGroup(GroupContext),
}

/// What the state machine did with one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Group-start marker consumed.
    Started,
    /// Group-end marker consumed.
    Ended,
    /// Ordinary record; build it with [`GroupState::context`].
    Forward,
}

static NO_CONTEXT: GroupContext = GroupContext {
    resource: None,
    scope: None,
};

impl GroupState {
    pub fn new() -> Self {
        Self::Idle
    }

    /// Feed the next record in stream order.
    pub fn step(&mut self, record: &DynamicMap) -> Step {
        if is_group_start(record) {
            *self = GroupState::InGroup(extract_context(record));
            return Step::Started;
        }
        if is_group_end(record) {
            *self = GroupState::Idle;
            return Step::Ended;
        }
        Step::Forward
    }

    /// The context ordinary records currently receive.
    pub fn context(&self) -> &GroupContext {
        match self {
            GroupState::Idle => &NO_CONTEXT,
            GroupState::InGroup(ctx) => ctx,
        }
    }

    pub fn in_group(&self) -> bool {
        matches!(self, GroupState::InGroup(_))
    }
}

/// Both `resource` and `scope` present, whatever their values.
pub fn is_group_start(record: &DynamicMap) -> bool {
    let mut has_resource = false;
    let mut has_scope = false;
    for (key, _) in record.iter() {
        match key.to_text().as_str() {
            RESOURCE_KEY => has_resource = true,
            SCOPE_KEY => has_scope = true,
            _ => {}
        }
    }
    has_resource && has_scope
}

pub fn is_group_end(record: &DynamicMap) -> bool {
    record.is_empty()
}

// Only map-typed values become context. When a key repeats, the last map wins
// and non-map repeats leave an earlier map in place.
fn extract_context(record: &DynamicMap) -> GroupContext {
    let mut ctx = GroupContext::default();
    for (key, value) in record.iter() {
        let Some(map) = value.as_map() else { continue };
        match key.to_text().as_str() {
            RESOURCE_KEY => ctx.resource = Some(map.clone()),
            SCOPE_KEY => ctx.scope = Some(map.clone()),
            _ => {}
        }
    }
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{DynamicKey, DynamicValue};
    use bytes::Bytes;

    fn start(resource: DynamicValue, scope: DynamicValue) -> DynamicMap {
        DynamicMap::new().with("resource", resource).with("scope", scope)
    }

    // ── Markers ──────────────────────────────────────────────────

    #[test]
    fn test_group_start_requires_both_keys() {
        assert!(is_group_start(&start(DynamicMap::new().into(), DynamicMap::new().into())));
        assert!(!is_group_start(&DynamicMap::new().with("resource", DynamicMap::new())));
        assert!(!is_group_start(&DynamicMap::new().with("scope", DynamicMap::new())));
    }

    #[test]
    fn test_group_start_accepts_byte_keys() {
        let mut record = DynamicMap::new();
        record.insert(DynamicKey::Bytes(Bytes::from_static(b"resource")), DynamicMap::new().into());
        record.insert(DynamicKey::Bytes(Bytes::from_static(b"scope")), DynamicMap::new().into());
        assert!(is_group_start(&record));
    }

    #[test]
    fn test_group_end_is_empty_map() {
        assert!(is_group_end(&DynamicMap::new()));
        assert!(!is_group_end(&DynamicMap::new().with("a", 1i64)));
    }

    // ── Transitions ──────────────────────────────────────────────

    #[test]
    fn test_initial_state_is_idle() {
        let state = GroupState::new();
        assert!(!state.in_group());
        assert!(state.context().is_empty());
    }

    #[test]
    fn test_start_enters_group_without_forwarding() {
        let mut state = GroupState::new();
        let marker = start(
            DynamicMap::new().with("env", "prod").into(),
            DynamicMap::new().with("name", "svc").into(),
        );

        assert_eq!(state.step(&marker), Step::Started);
        assert!(state.in_group());
        assert_eq!(
            state.context().resource.as_ref().and_then(|r| r.get("env")),
            Some(&DynamicValue::from("prod"))
        );
        assert_eq!(
            state.context().scope.as_ref().and_then(|s| s.get("name")),
            Some(&DynamicValue::from("svc"))
        );
    }

    #[test]
    fn test_non_map_values_leave_side_absent() {
        let mut state = GroupState::new();
        state.step(&start("not-a-map".into(), DynamicMap::new().with("name", "svc").into()));

        assert!(state.in_group());
        assert!(state.context().resource.is_none());
        assert!(state.context().scope.is_some());
    }

    #[test]
    fn test_both_sides_non_map_still_enters_group() {
        let mut state = GroupState::new();
        assert_eq!(state.step(&start(DynamicValue::Null, 3i64.into())), Step::Started);
        assert!(state.in_group());
        assert!(state.context().is_empty());
    }

    #[test]
    fn test_ordinary_record_forwards_current_context() {
        let mut state = GroupState::new();
        let record = DynamicMap::new().with("msg", "hi");

        assert_eq!(state.step(&record), Step::Forward);
        assert!(state.context().is_empty());

        state.step(&start(DynamicMap::new().with("env", "prod").into(), DynamicMap::new().into()));
        assert_eq!(state.step(&record), Step::Forward);
        assert!(state.context().resource.is_some());
        assert!(state.in_group());
    }

    #[test]
    fn test_end_clears_context() {
        let mut state = GroupState::new();
        state.step(&start(DynamicMap::new().with("env", "prod").into(), DynamicMap::new().into()));

        assert_eq!(state.step(&DynamicMap::new()), Step::Ended);
        assert!(!state.in_group());
        assert!(state.context().is_empty());
    }

    #[test]
    fn test_end_while_idle_is_harmless() {
        let mut state = GroupState::new();
        assert_eq!(state.step(&DynamicMap::new()), Step::Ended);
        assert_eq!(state, GroupState::Idle);
    }

    #[test]
    fn test_new_start_replaces_previous_group() {
        let mut state = GroupState::new();
        state.step(&start(DynamicMap::new().with("env", "prod").into(), DynamicMap::new().into()));
        state.step(&start(DynamicMap::new().with("env", "dev").into(), DynamicValue::Null));

        let ctx = state.context();
        assert_eq!(
            ctx.resource.as_ref().and_then(|r| r.get("env")),
            Some(&DynamicValue::from("dev"))
        );
        assert!(ctx.scope.is_none());
    }

    #[test]
    fn test_repeated_key_keeps_last_map() {
        let record = DynamicMap::new()
            .with("resource", DynamicMap::new().with("v", 1i64))
            .with("scope", DynamicMap::new())
            .with("resource", DynamicMap::new().with("v", 2i64))
            .with("resource", "ignored");
        let ctx = extract_context(&record);
        assert_eq!(
            ctx.resource.as_ref().and_then(|r| r.get("v")),
            Some(&DynamicValue::Int(2))
        );
    }
}
