//! The consumer-facing query client.
//!
//! Views call [`QueryClient::subscribe`] to observe a query and
//! [`QueryClient::mutate`] to fire a mutation. A [`QueryHandle`] is the
//! live subscription: it exposes typed snapshots of the cache entry, wakes
//! on every change, and unsubscribes on drop. One client owns one cache
//! store and one transport; isolated instances can run side by side (tests
//! rely on this).

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use crate::api::{ApiError, HttpTransport, Transport, Verb};
use crate::cache::entry::EntryView;
use crate::cache::key::CacheKey;
use crate::cache::store::{CacheEvent, CacheStore, FetchOutcome, Fetcher};
use crate::cache::subscription::ConsumerId;
use crate::cache::QueryStatus;
use crate::config::Config;
use crate::endpoint::{MutationDef, QueryDef};

/// Typed, point-in-time view of one cached query.
#[derive(Debug)]
pub struct QuerySnapshot<D> {
    /// Last good data, present even while stale or after a failed refetch.
    pub data: Option<D>,
    pub status: QueryStatus,
    pub error: Option<ApiError>,
    pub last_fetched_at: Option<DateTime<Utc>>,
    /// A fetch for this key is currently in flight.
    pub is_fetching: bool,
}

impl<D: DeserializeOwned> QuerySnapshot<D> {
    fn from_view(view: EntryView) -> Self {
        // Stored data was validated against D at fetch time, so this
        // round-trip cannot fail for matching handles.
        let data = view
            .data
            .as_deref()
            .and_then(|value| serde_json::from_value(value.clone()).ok());
        Self {
            data,
            status: view.status,
            error: view.error,
            last_fetched_at: view.last_fetched_at,
            is_fetching: view.is_fetching,
        }
    }

    fn empty() -> Self {
        Self {
            data: None,
            status: QueryStatus::Idle,
            error: None,
            last_fetched_at: None,
            is_fetching: false,
        }
    }
}

/// Entry point for all queries and mutations.
pub struct QueryClient {
    store: CacheStore,
    transport: Arc<dyn Transport>,
    next_consumer: AtomicU64,
}

impl QueryClient {
    /// Build a client over an explicit transport (tests pass a fake here).
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            store: CacheStore::new(config),
            transport,
            next_consumer: AtomicU64::new(1),
        }
    }

    /// Build a client over an HTTP transport for the configured backend.
    pub fn http(config: &Config) -> Result<Self, ApiError> {
        let transport = Arc::new(HttpTransport::new(config)?);
        Ok(Self::new(config, transport))
    }

    /// Start observing a query. Returns a handle whose drop ends the
    /// subscription; the cached entry survives for the configured grace
    /// window afterwards.
    pub fn subscribe<A, D>(
        &self,
        def: &'static QueryDef<A, D>,
        args: A,
    ) -> Result<QueryHandle<D>, ApiError>
    where
        A: Serialize + Clone + Send + Sync + 'static,
        D: DeserializeOwned + Serialize + Send + 'static,
    {
        let args_value =
            serde_json::to_value(&args).map_err(|e| ApiError::Shape(e.to_string()))?;
        let key = CacheKey::new(def.id, &args_value);
        let consumer = self.next_consumer.fetch_add(1, Ordering::Relaxed);
        let fetcher = build_fetcher(Arc::clone(&self.transport), def, args);

        // Receiver first, so no event between mount and first read is lost
        let events = self.store.events();
        self.store.subscribe(&key, consumer, fetcher);

        Ok(QueryHandle {
            store: self.store.clone(),
            key,
            consumer,
            events,
            _marker: PhantomData,
        })
    }

    /// Fire a mutation. On success the tags it declares are invalidated
    /// before this returns; on failure the error goes to this caller alone
    /// and the cache is left untouched.
    pub async fn mutate<A, D>(
        &self,
        def: &'static MutationDef<A, D>,
        args: A,
    ) -> Result<D, ApiError>
    where
        D: DeserializeOwned,
    {
        let address = (def.address)(&args);
        let body = (def.body)(&args);
        debug!(mutation = def.id, verb = %def.verb, "Dispatching mutation");

        let raw = self
            .transport
            .request(&address, def.verb, body.as_ref())
            .await?;
        let typed: D = serde_json::from_value(raw).map_err(|e| ApiError::Shape(e.to_string()))?;

        let tags = (def.invalidates)(&args, &typed);
        self.store.invalidate(&tags);
        Ok(typed)
    }
}

/// Build the type-erased refetch recipe the store keeps per key.
fn build_fetcher<A, D>(
    transport: Arc<dyn Transport>,
    def: &'static QueryDef<A, D>,
    args: A,
) -> Fetcher
where
    A: Clone + Send + Sync + 'static,
    D: DeserializeOwned + Serialize + Send + 'static,
{
    Arc::new(move || {
        let transport = Arc::clone(&transport);
        let args = args.clone();
        Box::pin(async move {
            let address = (def.address)(&args);
            let raw = transport.request(&address, Verb::Get, None).await?;
            // Validate against the endpoint schema; a mismatch is a
            // response-class failure, never stored.
            let typed: D =
                serde_json::from_value(raw).map_err(|e| ApiError::Shape(e.to_string()))?;
            let tags = (def.provides)(&args, &typed);
            let data =
                serde_json::to_value(&typed).map_err(|e| ApiError::Shape(e.to_string()))?;
            Ok(FetchOutcome { data, tags })
        })
    })
}

/// A live subscription to one query.
pub struct QueryHandle<D> {
    store: CacheStore,
    key: CacheKey,
    consumer: ConsumerId,
    events: broadcast::Receiver<CacheEvent>,
    _marker: PhantomData<fn() -> D>,
}

impl<D: DeserializeOwned> QueryHandle<D> {
    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// Current typed view of the entry.
    pub fn snapshot(&self) -> QuerySnapshot<D> {
        match self.store.read(&self.key) {
            Some(view) => QuerySnapshot::from_view(view),
            None => QuerySnapshot::empty(),
        }
    }

    /// Wait until this entry changes observably.
    pub async fn changed(&mut self) {
        loop {
            match self.events.recv().await {
                Ok(event) if event.key == self.key => return,
                Ok(_) => continue,
                // Lagged receivers may have missed our key; report a change
                // so the caller re-reads the snapshot.
                Err(broadcast::error::RecvError::Lagged(_)) => return,
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    }

    /// Wait until no fetch is pending for this entry and return the
    /// snapshot (`Success` or `Error`).
    pub async fn settled(&mut self) -> QuerySnapshot<D> {
        loop {
            let snapshot = self.snapshot();
            let busy = snapshot.is_fetching
                || matches!(snapshot.status, QueryStatus::Loading | QueryStatus::Stale);
            if !busy {
                return snapshot;
            }
            self.changed().await;
        }
    }

    /// Caller-initiated retry: force a refetch and wait for it.
    pub async fn refetch(&mut self) -> QuerySnapshot<D> {
        self.store.refetch(&self.key);
        self.settled().await
    }
}

impl<D> Drop for QueryHandle<D> {
    fn drop(&mut self) {
        self.store.unsubscribe(&self.key, self.consumer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Address;
    use crate::endpoints::{attendance, dashboard, leave, salary, teachers};
    use crate::models::{
        ApprovalStatus, AttendanceFilter, AttendanceStatus, LeaveRequestFilter, MarkAttendanceArgs,
        ProcessLeaveArgs,
    };
    use crate::views::{attendance_summary, partition_by_status};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Scripted transport: responses are keyed by `"<VERB> <request line>"`
    /// and consumed in order, with the last one repeating.
    #[derive(Default)]
    struct FakeTransport {
        responses: Mutex<HashMap<String, VecDeque<Result<Value, ApiError>>>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn enqueue(&self, line: &str, response: Result<Value, ApiError>) {
            self.responses
                .lock()
                .unwrap()
                .entry(line.to_string())
                .or_default()
                .push_back(response);
        }

        fn calls_for(&self, line: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|call| call.as_str() == line)
                .count()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn request(
            &self,
            address: &Address,
            verb: Verb,
            _body: Option<&Value>,
        ) -> Result<Value, ApiError> {
            let line = format!("{} {}", verb, address.to_request_line());
            self.calls.lock().unwrap().push(line.clone());

            let mut responses = self.responses.lock().unwrap();
            match responses.get_mut(&line) {
                Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(|| {
                    Err(ApiError::Shape(format!("empty queue for {}", line)))
                }),
                Some(queue) => queue
                    .front()
                    .cloned()
                    .unwrap_or_else(|| Err(ApiError::Shape(format!("empty queue for {}", line)))),
                None => Err(ApiError::Shape(format!("unexpected request: {}", line))),
            }
        }
    }

    fn client_with(transport: &Arc<FakeTransport>) -> QueryClient {
        QueryClient::new(&Config::default(), Arc::clone(transport) as Arc<dyn Transport>)
    }

    fn pending_leave(id: &str) -> Value {
        json!({
            "_id": id,
            "teacherId": {"_id": "t1", "name": "Asha Verma"},
            "leaveType": "Sick",
            "fromDate": "2024-01-10T00:00:00Z",
            "toDate": "2024-01-12T00:00:00Z",
            "status": "pending"
        })
    }

    fn approved_leave(id: &str) -> Value {
        let mut record = pending_leave(id);
        record["status"] = json!("approved");
        record
    }

    #[tokio::test(start_paused = true)]
    async fn test_approving_a_leave_moves_it_between_partitions() {
        let transport = FakeTransport::new();
        let list_line = "GET /api/v1/leaveRequest/getLeaveRequests?limit=100";
        transport.enqueue(
            list_line,
            Ok(json!({"leaveRequests": [pending_leave("lr1")]})),
        );
        transport.enqueue(
            list_line,
            Ok(json!({"leaveRequests": [approved_leave("lr1")]})),
        );
        transport.enqueue(
            "PUT /api/v1/leaveRequest/processLeaveRequest/lr1",
            Ok(json!({"message": "Leave request approved"})),
        );

        let client = client_with(&transport);
        let mut handle = client
            .subscribe(
                &leave::GET_LEAVE_REQUESTS,
                LeaveRequestFilter {
                    limit: Some(100),
                    ..LeaveRequestFilter::default()
                },
            )
            .unwrap();

        let snapshot = handle.settled().await;
        let list = snapshot.data.unwrap();
        let counts = partition_by_status(&list.leave_requests).counts();
        assert_eq!((counts.pending, counts.approved), (1, 0));

        client
            .mutate(
                &leave::PROCESS_LEAVE_REQUEST,
                ProcessLeaveArgs {
                    id: "lr1".to_string(),
                    status: ApprovalStatus::Approved,
                    rejection_reason: None,
                },
            )
            .await
            .unwrap();

        let snapshot = handle.settled().await;
        let list = snapshot.data.unwrap();
        let counts = partition_by_status(&list.leave_requests).counts();
        assert_eq!((counts.pending, counts.approved), (0, 1));
        assert_eq!(transport.calls_for(list_line), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_mutation_surfaces_only_to_caller() {
        let transport = FakeTransport::new();
        let list_line = "GET /api/v1/leaveRequest/getLeaveRequests";
        transport.enqueue(
            list_line,
            Ok(json!({"leaveRequests": [pending_leave("lr1")]})),
        );
        transport.enqueue(
            "PUT /api/v1/leaveRequest/processLeaveRequest/lr1",
            Err(ApiError::Response {
                status: 400,
                message: "Leave request already processed".to_string(),
            }),
        );

        let client = client_with(&transport);
        let mut handle = client
            .subscribe(&leave::GET_LEAVE_REQUESTS, LeaveRequestFilter::default())
            .unwrap();
        handle.settled().await;

        let error = client
            .mutate(
                &leave::PROCESS_LEAVE_REQUEST,
                ProcessLeaveArgs {
                    id: "lr1".to_string(),
                    status: ApprovalStatus::Approved,
                    rejection_reason: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(error.status(), Some(400));

        // The failure must not have invalidated anything
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.status, QueryStatus::Success);
        assert_eq!(transport.calls_for(list_line), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_subscriptions_share_one_fetch() {
        let transport = FakeTransport::new();
        let line = "GET /api/v1/approveReject/getAllTeachers";
        transport.enqueue(line, Ok(json!([{"_id": "t1", "name": "Asha Verma"}])));

        let client = client_with(&transport);
        let mut handles = Vec::new();
        for _ in 0..5 {
            handles.push(client.subscribe(&teachers::GET_ALL_TEACHERS, ()).unwrap());
        }
        for handle in &mut handles {
            let snapshot = handle.settled().await;
            assert_eq!(snapshot.data.unwrap().len(), 1);
        }

        assert_eq!(transport.calls_for(line), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidating_one_teacher_leaves_the_other_alone() {
        let transport = FakeTransport::new();
        let id1_line = "GET /api/v1/approveReject/teacher-details/ID1";
        let id2_line = "GET /api/v1/approveReject/teacher-details/ID2";
        transport.enqueue(id1_line, Ok(json!({"_id": "ID1", "name": "A", "status": "pending"})));
        transport.enqueue(id1_line, Ok(json!({"_id": "ID1", "name": "A", "isApproved": true})));
        transport.enqueue(id2_line, Ok(json!({"_id": "ID2", "name": "B", "status": "pending"})));
        transport.enqueue(
            "PUT /api/v1/approveReject/teacherApprove/ID1",
            Ok(json!({"message": "approved"})),
        );

        let client = client_with(&transport);
        let mut handle1 = client
            .subscribe(&teachers::GET_TEACHER_DETAILS, "ID1".to_string())
            .unwrap();
        let mut handle2 = client
            .subscribe(&teachers::GET_TEACHER_DETAILS, "ID2".to_string())
            .unwrap();
        handle1.settled().await;
        handle2.settled().await;

        client
            .mutate(&teachers::APPROVE_TEACHER, "ID1".to_string())
            .await
            .unwrap();

        let snapshot1 = handle1.settled().await;
        assert_eq!(
            snapshot1.data.unwrap().workflow_status(),
            ApprovalStatus::Approved
        );
        assert_eq!(transport.calls_for(id1_line), 2);

        // ID2 was never touched
        assert_eq!(handle2.snapshot().status, QueryStatus::Success);
        assert_eq!(transport.calls_for(id2_line), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_marking_present_refreshes_absent_filter() {
        let transport = FakeTransport::new();
        let absent_line = "GET /attendance/getAttendances?date=2024-01-10&status=absent";
        transport.enqueue(
            absent_line,
            Ok(json!({"attendances": [{
                "_id": "at1",
                "teacherId": {"_id": "t1", "name": "Asha Verma"},
                "date": "2024-01-10",
                "status": "absent"
            }]})),
        );
        transport.enqueue(absent_line, Ok(json!({"attendances": []})));
        transport.enqueue(
            "POST /attendance/markAttendance",
            Ok(json!({
                "message": "Attendance marked",
                "attendance": {"_id": "at1", "date": "2024-01-10", "status": "present"}
            })),
        );

        let client = client_with(&transport);
        let mut handle = client
            .subscribe(
                &attendance::GET_ATTENDANCES,
                AttendanceFilter {
                    date: Some("2024-01-10".to_string()),
                    status: Some(AttendanceStatus::Absent),
                    page: None,
                    limit: None,
                },
            )
            .unwrap();

        let snapshot = handle.settled().await;
        assert_eq!(snapshot.data.unwrap().attendances.len(), 1);

        client
            .mutate(
                &attendance::MARK_ATTENDANCE,
                MarkAttendanceArgs {
                    teacher_id: "t1".to_string(),
                    date: "2024-01-10".to_string(),
                    status: AttendanceStatus::Present,
                    check_in: None,
                    check_out: None,
                    remarks: None,
                },
            )
            .await
            .unwrap();

        let snapshot = handle.settled().await;
        let list = snapshot.data.unwrap();
        assert!(list.attendances.is_empty());
        assert_eq!(attendance_summary(&list.attendances).total, 0);
        assert_eq!(transport.calls_for(absent_line), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refetch_keeps_last_good_data() {
        let transport = FakeTransport::new();
        let line = "GET /api/v1/salary/getAllPayments";
        transport.enqueue(
            line,
            Ok(json!({"records": [{"_id": "p1", "month": "2024-01", "paidAmount": 52000.0}]})),
        );
        transport.enqueue(line, Err(ApiError::Network("connection refused".to_string())));
        transport.enqueue(
            line,
            Ok(json!({"records": [{"_id": "p1", "month": "2024-01", "paidAmount": 55000.0}]})),
        );

        let client = client_with(&transport);
        let mut handle = client
            .subscribe(&salary::GET_ALL_PAYMENTS, crate::models::SalaryFilter::default())
            .unwrap();
        handle.settled().await;

        let snapshot = handle.refetch().await;
        assert_eq!(snapshot.status, QueryStatus::Error);
        let stale = snapshot.data.expect("stale data must remain displayable");
        assert_eq!(stale.records[0].paid_amount, 52000.0);

        // Explicit retry recovers
        let snapshot = handle.refetch().await;
        assert_eq!(snapshot.status, QueryStatus::Success);
        assert_eq!(snapshot.data.unwrap().records[0].paid_amount, 55000.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leave_mutations_refresh_dashboard_counters() {
        let transport = FakeTransport::new();
        let stats_line = "GET /dashboard/getDashboardStats";
        transport.enqueue(stats_line, Ok(json!({"data": {"pendingLeaves": 5}})));
        transport.enqueue(stats_line, Ok(json!({"data": {"pendingLeaves": 4}})));
        transport.enqueue(
            "PUT /api/v1/leaveRequest/processLeaveRequest/lr1",
            Ok(json!({"message": "ok"})),
        );

        let client = client_with(&transport);
        let mut handle = client
            .subscribe(&dashboard::GET_DASHBOARD_STATS, ())
            .unwrap();
        let snapshot = handle.settled().await;
        assert_eq!(snapshot.data.unwrap().data.pending_leaves, 5);

        client
            .mutate(
                &leave::PROCESS_LEAVE_REQUEST,
                ProcessLeaveArgs {
                    id: "lr1".to_string(),
                    status: ApprovalStatus::Approved,
                    rejection_reason: None,
                },
            )
            .await
            .unwrap();

        let snapshot = handle.settled().await;
        assert_eq!(snapshot.data.unwrap().data.pending_leaves, 4);
        assert_eq!(transport.calls_for(stats_line), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_filter_spelled_differently_hits_the_cache() {
        let transport = FakeTransport::new();
        let line = "GET /api/v1/leaveRequest/getLeaveRequests";
        transport.enqueue(line, Ok(json!({"leaveRequests": []})));

        let client = client_with(&transport);
        let mut first = client
            .subscribe(
                &leave::GET_LEAVE_REQUESTS,
                LeaveRequestFilter {
                    page: None,
                    limit: None,
                    status: None,
                },
            )
            .unwrap();
        first.settled().await;

        // Default-constructed filter normalizes to the same cache key
        let second = client
            .subscribe(&leave::GET_LEAVE_REQUESTS, LeaveRequestFilter::default())
            .unwrap();
        assert_eq!(first.key(), second.key());
        assert_eq!(second.snapshot().status, QueryStatus::Success);
        assert_eq!(transport.calls_for(line), 1);
    }
}
