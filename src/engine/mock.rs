//! In-memory engine for testing.
//!
//! [`MockEngine`] behaves like a small agent backed by an ordered MIB: gets
//! read from it, sets write to it and walks page through it in GETBULK-sized
//! chunks (overshooting the requested subtree like a real agent would).
//! Failures and raw walk responses can be queued to exercise error paths.

use super::{Engine, EngineError, EngineResult, Target};
use crate::oid::Oid;
use crate::session::SecurityContext;
use crate::value::Value;
use crate::varbind::VarBind;
use std::collections::{BTreeMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

/// The operation recorded for each engine call.
#[derive(Clone, Debug, PartialEq)]
pub enum MockOperation {
    Get {
        oid: Oid,
    },
    Set {
        oid: Oid,
        value: Value,
    },
    BulkWalk {
        root: Oid,
        non_repeaters: u32,
        max_repetitions: u32,
    },
}

/// A call observed by the mock engine.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    /// Target the call was addressed to.
    pub target: Target,
    /// Security context passed with the call.
    pub security: SecurityContext,
    /// What was requested.
    pub operation: MockOperation,
}

/// A scripted answer, consumed in queue order.
#[derive(Debug)]
enum Scripted {
    Fail(EngineError),
    Walk(Vec<VarBind>),
}

#[derive(Debug, Default)]
struct MockEngineInner {
    mib: BTreeMap<Oid, Value>,
    script: VecDeque<Scripted>,
    requests: Vec<RecordedRequest>,
}

/// Programmable engine for tests.
///
/// Clones share state, so a test can hand one clone to a session and keep
/// another to inspect [`requests`](Self::requests).
///
/// # Example
///
/// ```rust
/// use snmp_table::engine::MockEngine;
/// use snmp_table::{oid, Value};
///
/// let engine = MockEngine::new();
/// engine.insert(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), "router1");
/// engine.insert(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), Value::TimeTicks(12345));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MockEngine {
    inner: Arc<Mutex<MockEngineInner>>,
}

impl MockEngine {
    /// Create an engine with an empty MIB.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine preloaded with `varbinds`.
    pub fn with_varbinds(varbinds: impl IntoIterator<Item = VarBind>) -> Self {
        let engine = Self::new();
        engine.extend(varbinds);
        engine
    }

    fn lock(&self) -> MutexGuard<'_, MockEngineInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store a value in the MIB.
    pub fn insert(&self, oid: Oid, value: impl Into<Value>) {
        self.lock().mib.insert(oid, value.into());
    }

    /// Store several values in the MIB.
    pub fn extend(&self, varbinds: impl IntoIterator<Item = VarBind>) {
        self.lock()
            .mib
            .extend(varbinds.into_iter().map(|vb| (vb.oid, vb.value)));
    }

    /// Current MIB value at `oid`.
    pub fn value(&self, oid: &Oid) -> Option<Value> {
        self.lock().mib.get(oid).cloned()
    }

    /// Queue a failure.
    ///
    /// Scripted answers are consumed in order: a queued failure is returned by
    /// the first call that reaches it, of any kind.
    pub fn queue_error(&self, error: EngineError) {
        self.lock().script.push_back(Scripted::Fail(error));
    }

    /// Queue a walk response of exactly `varbinds`, bypassing the MIB.
    ///
    /// Gets and sets skip over a queued walk without consuming it.
    pub fn queue_walk(&self, varbinds: Vec<VarBind>) {
        self.lock().script.push_back(Scripted::Walk(varbinds));
    }

    /// All calls seen so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Forget recorded calls.
    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    fn record(
        &self,
        target: &Target,
        security: &SecurityContext,
        operation: MockOperation,
    ) -> MutexGuard<'_, MockEngineInner> {
        let mut inner = self.lock();
        inner.requests.push(RecordedRequest {
            target: target.clone(),
            security: security.clone(),
            operation,
        });
        inner
    }
}

impl MockEngineInner {
    fn take_failure(&mut self) -> Option<EngineError> {
        match self.script.front() {
            Some(Scripted::Fail(_)) => match self.script.pop_front() {
                Some(Scripted::Fail(err)) => Some(err),
                _ => None,
            },
            _ => None,
        }
    }

    /// GETBULK pages from `root` until a page leaves the subtree or the MIB ends.
    fn walk(&self, root: &Oid, max_repetitions: u32) -> Vec<VarBind> {
        let page = max_repetitions.max(1) as usize;
        let mut out = Vec::new();
        let mut following = self
            .mib
            .range::<Oid, _>((std::ops::Bound::Excluded(root), std::ops::Bound::Unbounded))
            .peekable();

        while following.peek().is_some() {
            let mut left_subtree = false;
            for (oid, value) in following.by_ref().take(page) {
                left_subtree |= !oid.is_descendant_of(root);
                out.push(VarBind::new(oid.clone(), value.clone()));
            }
            if left_subtree {
                break;
            }
        }
        out
    }
}

impl Engine for MockEngine {
    fn get_single(
        &self,
        target: &Target,
        security: &SecurityContext,
        oid: &Oid,
    ) -> impl Future<Output = EngineResult<Value>> + Send {
        let result = {
            let mut inner = self.record(target, security, MockOperation::Get { oid: oid.clone() });
            match inner.take_failure() {
                Some(err) => Err(err),
                None => Ok(inner.mib.get(oid).cloned().unwrap_or(Value::NoSuchInstance)),
            }
        };
        async move { result }
    }

    fn set_single(
        &self,
        target: &Target,
        security: &SecurityContext,
        oid: &Oid,
        value: Value,
    ) -> impl Future<Output = EngineResult<Value>> + Send {
        let result = {
            let mut inner = self.record(
                target,
                security,
                MockOperation::Set {
                    oid: oid.clone(),
                    value: value.clone(),
                },
            );
            match inner.take_failure() {
                Some(err) => Err(err),
                None => {
                    inner.mib.insert(oid.clone(), value.clone());
                    Ok(value)
                }
            }
        };
        async move { result }
    }

    fn bulk_walk(
        &self,
        target: &Target,
        security: &SecurityContext,
        root: &Oid,
        non_repeaters: u32,
        max_repetitions: u32,
    ) -> impl Future<Output = EngineResult<Vec<VarBind>>> + Send {
        let result = {
            let mut inner = self.record(
                target,
                security,
                MockOperation::BulkWalk {
                    root: root.clone(),
                    non_repeaters,
                    max_repetitions,
                },
            );
            match inner.script.pop_front() {
                Some(Scripted::Fail(err)) => Err(err),
                Some(Scripted::Walk(walk)) => Ok(walk),
                None => Ok(inner.walk(root, max_repetitions)),
            }
        };
        async move { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorStatus;
    use crate::oid;
    use crate::session::Auth;
    use std::time::Duration;

    fn target() -> Target {
        Target::new("192.0.2.1", 161, Duration::from_secs(1), 0)
    }

    fn security() -> SecurityContext {
        Auth::v2c("public").security_context()
    }

    fn if_table() -> MockEngine {
        let base = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1);
        MockEngine::with_varbinds([
            VarBind::new(base.child(1).child(1), 1i32),
            VarBind::new(base.child(1).child(2), 2i32),
            VarBind::new(base.child(2).child(1), "lo"),
            VarBind::new(base.child(2).child(2), "eth0"),
            VarBind::new(oid!(1, 3, 6, 1, 2, 1, 4, 1, 0), 2i32),
        ])
    }

    #[tokio::test]
    async fn test_get_hit_and_miss() {
        let engine = if_table();
        let v = engine
            .get_single(&target(), &security(), &oid!(1, 3, 6, 1, 2, 1, 4, 1, 0))
            .await
            .unwrap();
        assert_eq!(v, Value::Integer(2));

        let v = engine
            .get_single(&target(), &security(), &oid!(1, 3, 6, 1, 9))
            .await
            .unwrap();
        assert_eq!(v, Value::NoSuchInstance);
        assert_eq!(engine.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_walk_overshoots_by_page() {
        let engine = if_table();
        let root = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 1);

        let walked = engine
            .bulk_walk(&target(), &security(), &root, 0, 3)
            .await
            .unwrap();
        assert_eq!(walked.len(), 3);
        assert!(walked[0].is_under(&root) && walked[1].is_under(&root));
        assert!(!walked[2].is_under(&root));

        let walked = engine
            .bulk_walk(&target(), &security(), &root, 0, 1)
            .await
            .unwrap();
        assert_eq!(walked.len(), 3);
    }

    #[tokio::test]
    async fn test_walk_to_end_of_mib() {
        let engine = if_table();
        let walked = engine
            .bulk_walk(&target(), &security(), &oid!(1, 3, 6, 1, 2, 1, 4), 0, 20)
            .await
            .unwrap();
        assert_eq!(walked.len(), 1);
    }

    #[tokio::test]
    async fn test_queued_error_and_walk() {
        let engine = MockEngine::new();
        engine.queue_error(EngineError::Protocol {
            status: ErrorStatus::NoAccess,
            index: 1,
        });
        engine.queue_walk(vec![VarBind::null(oid!(1, 3, 6, 1, 1))]);
        engine.queue_error(EngineError::engine("no response"));

        let root = oid!(1, 3, 6, 1);
        let err = engine
            .bulk_walk(&target(), &security(), &root, 0, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Protocol { .. }));

        let walked = engine
            .bulk_walk(&target(), &security(), &root, 0, 10)
            .await
            .unwrap();
        assert_eq!(walked, vec![VarBind::null(oid!(1, 3, 6, 1, 1))]);

        let err = engine
            .get_single(&target(), &security(), &root)
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::engine("no response"));
    }

    #[tokio::test]
    async fn test_get_skips_queued_walk() {
        let engine = if_table();
        let root = oid!(1, 3, 6, 1, 2, 1, 4);
        engine.queue_walk(Vec::new());

        let v = engine
            .get_single(&target(), &security(), &oid!(1, 3, 6, 1, 2, 1, 4, 1, 0))
            .await
            .unwrap();
        assert_eq!(v, Value::Integer(2));
        let walked = engine
            .bulk_walk(&target(), &security(), &root, 0, 10)
            .await
            .unwrap();
        assert!(walked.is_empty());
    }

    #[tokio::test]
    async fn test_set_writes_and_echoes() {
        let engine = MockEngine::new();
        let oid = oid!(1, 3, 6, 1, 2, 1, 1, 6, 0);
        let echoed = engine
            .set_single(&target(), &security(), &oid, Value::from("lab"))
            .await
            .unwrap();
        assert_eq!(echoed, Value::from("lab"));
        assert_eq!(engine.value(&oid), Some(Value::from("lab")));
        assert!(matches!(
            engine.requests()[0].operation,
            MockOperation::Set { .. }
        ));
    }
}
