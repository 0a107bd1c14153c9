//! The bridge channel: capability registry, attached endpoints and the
//! outbox of pending replies and events.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use web4x_common::{BridgeError, EndpointId};

use crate::capability::Capability;
use crate::protocol::{BridgeEvent, ClientMessage, HostMessage};

type Outbox = Arc<Mutex<VecDeque<Outgoing>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A queued host-to-content message.
#[derive(Debug, Clone, PartialEq)]
pub enum Outgoing {
    /// Delivered to every endpoint attached at flush time.
    Broadcast(BridgeEvent),
    /// Delivered to one endpoint, dropped if it has been detached.
    Direct { to: EndpointId, message: HostMessage },
}

// =============================================================================
// EVENT EMITTER
// =============================================================================

/// Emission handle given to a capability. Events land in the channel outbox
/// in the order they are emitted.
#[derive(Clone)]
pub struct EventEmitter {
    capability: Arc<str>,
    outbox: Outbox,
}

impl EventEmitter {
    /// Name of the capability this emitter speaks for.
    pub fn capability(&self) -> &str {
        &self.capability
    }

    /// Queue `event` for every attached endpoint. Fire-and-forget.
    pub fn emit(&self, event: &str, payload: Value) {
        debug!(capability = %self.capability, event, "event emitted");
        lock(&self.outbox).push_back(Outgoing::Broadcast(BridgeEvent::new(
            self.capability.as_ref(),
            event,
            payload,
        )));
    }
}

// =============================================================================
// CHANNEL
// =============================================================================

/// One per window. Capabilities are registered while the channel is still
/// exclusively owned; once it is shared behind an `Arc` the registry is
/// frozen.
pub struct BridgeChannel {
    capabilities: BTreeMap<String, Arc<dyn Capability>>,
    endpoints: Mutex<BTreeSet<EndpointId>>,
    outbox: Outbox,
}

impl BridgeChannel {
    pub fn new() -> Self {
        Self {
            capabilities: BTreeMap::new(),
            endpoints: Mutex::new(BTreeSet::new()),
            outbox: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    // -------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------

    /// Expose `capability` under `name`.
    pub fn register<C>(&mut self, name: impl Into<String>, capability: C) -> Result<(), BridgeError>
    where
        C: Capability + 'static,
    {
        let name = name.into();
        if self.capabilities.contains_key(&name) {
            return Err(BridgeError::DuplicateCapability(name));
        }
        debug!(capability = %name, methods = capability.methods().len(), "capability registered");
        self.capabilities.insert(name, Arc::new(capability));
        Ok(())
    }

    /// Registered capability names, sorted.
    pub fn capability_names(&self) -> Vec<&str> {
        self.capabilities.keys().map(String::as_str).collect()
    }

    /// Every capability with its callable method names.
    pub fn describe(&self) -> BTreeMap<String, Vec<String>> {
        self.capabilities
            .iter()
            .map(|(name, cap)| {
                let methods = cap.methods().iter().map(|m| m.to_string()).collect();
                (name.clone(), methods)
            })
            .collect()
    }

    /// Emitter for a registered capability. Lets the host raise events on a
    /// capability's behalf.
    pub fn emitter(&self, capability: &str) -> Option<EventEmitter> {
        let (name, _) = self.capabilities.get_key_value(capability)?;
        Some(EventEmitter {
            capability: Arc::from(name.as_str()),
            outbox: Arc::clone(&self.outbox),
        })
    }

    // -------------------------------------------------------------------------
    // Endpoints
    // -------------------------------------------------------------------------

    /// Attach an endpoint. Returns `false` if it was already attached.
    pub fn attach(&self, endpoint: EndpointId) -> bool {
        let added = lock(&self.endpoints).insert(endpoint);
        if added {
            debug!(%endpoint, "endpoint attached");
        }
        added
    }

    /// Detach an endpoint. Pending replies addressed to it are dropped at
    /// the next flush.
    pub fn detach(&self, endpoint: EndpointId) -> bool {
        let removed = lock(&self.endpoints).remove(&endpoint);
        if removed {
            debug!(%endpoint, "endpoint detached");
        }
        removed
    }

    pub fn is_attached(&self, endpoint: EndpointId) -> bool {
        lock(&self.endpoints).contains(&endpoint)
    }

    /// Snapshot of the attached endpoints.
    pub fn attached(&self) -> Vec<EndpointId> {
        lock(&self.endpoints).iter().copied().collect()
    }

    // -------------------------------------------------------------------------
    // Invocation
    // -------------------------------------------------------------------------

    /// Call `method` on `capability` and wait for its answer.
    pub async fn invoke(
        &self,
        capability: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, BridgeError> {
        let cap = self
            .capabilities
            .get(capability)
            .ok_or_else(|| BridgeError::UnknownCapability(capability.to_string()))?;
        if !cap.methods().contains(&method) {
            return Err(BridgeError::UnknownMethod {
                capability: capability.to_string(),
                method: method.to_string(),
            });
        }
        let events = self
            .emitter(capability)
            .ok_or_else(|| BridgeError::UnknownCapability(capability.to_string()))?;
        debug!(capability, method, args = args.len(), "invoke");
        cap.invoke(method, args, &events).await
    }

    /// Queue a message for a single endpoint.
    pub fn send_to(&self, to: EndpointId, message: HostMessage) {
        lock(&self.outbox).push_back(Outgoing::Direct { to, message });
    }

    /// Handle a raw message posted by `from`.
    ///
    /// Discovery is answered immediately. Invocations are spawned on
    /// `runtime` so file I/O never stalls the caller; the reply is queued
    /// when the task finishes. The returned handle can be awaited, nothing
    /// requires it.
    pub fn handle_message(
        self: &Arc<Self>,
        from: EndpointId,
        raw: &str,
        runtime: &Handle,
    ) -> Option<JoinHandle<()>> {
        if !self.is_attached(from) {
            warn!(endpoint = %from, "bridge message from detached endpoint dropped");
            return None;
        }

        let message = match ClientMessage::from_json(raw) {
            Ok(m) => m,
            Err(e) => {
                warn!(endpoint = %from, body_len = raw.len(), error = %e, "bridge message rejected");
                return None;
            }
        };

        match message {
            ClientMessage::Discover { id } => {
                self.send_to(
                    from,
                    HostMessage::Capabilities {
                        id,
                        capabilities: self.describe(),
                    },
                );
                None
            }
            ClientMessage::Invoke {
                id,
                capability,
                method,
                args,
            } => {
                let channel = Arc::clone(self);
                Some(runtime.spawn(async move {
                    let outcome = channel.invoke(&capability, &method, args).await;
                    if let Err(ref e) = outcome {
                        warn!(endpoint = %from, %capability, %method, error = %e, "invoke failed");
                    }
                    channel.send_to(from, HostMessage::reply(id, outcome));
                }))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Delivery
    // -------------------------------------------------------------------------

    /// Number of queued messages.
    pub fn pending(&self) -> usize {
        lock(&self.outbox).len()
    }

    /// Deliver everything queued so far.
    ///
    /// Broadcast events go to every currently attached endpoint; direct
    /// messages go to their endpoint if it is still attached. Returns the
    /// broadcast events in emission order so the host can act on them too.
    pub fn flush(&self, mut deliver: impl FnMut(EndpointId, &HostMessage)) -> Vec<BridgeEvent> {
        let queued: Vec<Outgoing> = lock(&self.outbox).drain(..).collect();
        let endpoints = self.attached();
        let mut events = Vec::new();

        for outgoing in queued {
            match outgoing {
                Outgoing::Broadcast(event) => {
                    let message = HostMessage::Event(event.clone());
                    for endpoint in &endpoints {
                        deliver(*endpoint, &message);
                    }
                    events.push(event);
                }
                Outgoing::Direct { to, message } => {
                    if endpoints.contains(&to) {
                        deliver(to, &message);
                    } else {
                        debug!(endpoint = %to, "reply for detached endpoint discarded");
                    }
                }
            }
        }
        events
    }
}

impl Default for BridgeChannel {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Capability for Echo {
        fn methods(&self) -> &'static [&'static str] {
            &["echo", "shout"]
        }

        async fn invoke(
            &self,
            method: &str,
            args: Vec<Value>,
            events: &EventEmitter,
        ) -> Result<Value, BridgeError> {
            let value = args.into_iter().next().unwrap_or(Value::Null);
            if method == "shout" {
                events.emit("shouted", value.clone());
            }
            Ok(value)
        }
    }

    struct Counter;

    #[async_trait]
    impl Capability for Counter {
        fn methods(&self) -> &'static [&'static str] {
            &["next"]
        }

        async fn invoke(
            &self,
            _method: &str,
            _args: Vec<Value>,
            events: &EventEmitter,
        ) -> Result<Value, BridgeError> {
            for n in 1..=3 {
                events.emit("tick", json!(n));
            }
            Ok(json!(3))
        }
    }

    fn collect(channel: &BridgeChannel) -> (Vec<(EndpointId, HostMessage)>, Vec<BridgeEvent>) {
        let mut delivered = Vec::new();
        let events = channel.flush(|endpoint, message| delivered.push((endpoint, message.clone())));
        (delivered, events)
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut channel = BridgeChannel::new();
        channel.register("echo", Echo).unwrap();
        let err = channel.register("echo", Counter).unwrap_err();
        assert_eq!(err, BridgeError::DuplicateCapability("echo".into()));
        // The first registration is untouched.
        assert_eq!(channel.describe()["echo"], vec!["echo", "shout"]);
    }

    #[tokio::test]
    async fn distinct_names_are_independently_invokable() {
        let mut channel = BridgeChannel::new();
        channel.register("echo", Echo).unwrap();
        channel.register("counter", Counter).unwrap();

        assert_eq!(channel.capability_names(), vec!["counter", "echo"]);
        assert_eq!(
            channel.invoke("echo", "echo", vec![json!("hi")]).await.unwrap(),
            json!("hi")
        );
        assert_eq!(channel.invoke("counter", "next", vec![]).await.unwrap(), json!(3));
    }

    #[tokio::test]
    async fn unknown_capability_and_method_are_errors() {
        let mut channel = BridgeChannel::new();
        channel.register("echo", Echo).unwrap();

        assert_eq!(
            channel.invoke("nope", "echo", vec![]).await.unwrap_err(),
            BridgeError::UnknownCapability("nope".into())
        );
        assert!(matches!(
            channel.invoke("echo", "whisper", vec![]).await.unwrap_err(),
            BridgeError::UnknownMethod { .. }
        ));
    }

    #[tokio::test]
    async fn events_reach_every_attached_endpoint() {
        let mut channel = BridgeChannel::new();
        channel.register("echo", Echo).unwrap();
        channel.attach(EndpointId(1));
        channel.attach(EndpointId(2));

        channel.invoke("echo", "shout", vec![json!("hey")]).await.unwrap();
        let (delivered, events) = collect(&channel);

        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[0].0, EndpointId(1));
        assert_eq!(delivered[1].0, EndpointId(2));
        assert_eq!(events, vec![BridgeEvent::new("echo", "shouted", json!("hey"))]);
        assert_eq!(channel.pending(), 0);
    }

    #[tokio::test]
    async fn events_from_one_capability_keep_emission_order() {
        let mut channel = BridgeChannel::new();
        channel.register("counter", Counter).unwrap();
        channel.attach(EndpointId(1));

        channel.invoke("counter", "next", vec![]).await.unwrap();
        let (_, events) = collect(&channel);
        let ticks: Vec<Value> = events.into_iter().map(|e| e.payload).collect();
        assert_eq!(ticks, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn events_with_no_endpoints_still_reach_the_host() {
        let mut channel = BridgeChannel::new();
        channel.register("echo", Echo).unwrap();
        channel.emitter("echo").unwrap().emit("shouted", json!(1));

        let (delivered, events) = collect(&channel);
        assert!(delivered.is_empty());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn emitter_for_unregistered_capability_is_none() {
        let channel = BridgeChannel::new();
        assert!(channel.emitter("ghost").is_none());
    }

    #[test]
    fn direct_message_to_detached_endpoint_is_discarded() {
        let channel = BridgeChannel::new();
        channel.attach(EndpointId(1));
        channel.attach(EndpointId(2));
        channel.send_to(EndpointId(1), HostMessage::reply(1, Ok(json!("a"))));
        channel.send_to(EndpointId(2), HostMessage::reply(2, Ok(json!("b"))));
        channel.detach(EndpointId(1));

        let (delivered, _) = collect(&channel);
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].0, EndpointId(2));
    }

    #[test]
    fn attach_and_detach_report_changes() {
        let channel = BridgeChannel::new();
        assert!(channel.attach(EndpointId(5)));
        assert!(!channel.attach(EndpointId(5)));
        assert!(channel.is_attached(EndpointId(5)));
        assert!(channel.detach(EndpointId(5)));
        assert!(!channel.detach(EndpointId(5)));
        assert!(channel.attached().is_empty());
    }

    #[tokio::test]
    async fn discover_is_answered_to_the_caller_only() {
        let mut channel = BridgeChannel::new();
        channel.register("echo", Echo).unwrap();
        let channel = Arc::new(channel);
        channel.attach(EndpointId(1));
        channel.attach(EndpointId(2));

        let task = channel.handle_message(
            EndpointId(2),
            r#"{"kind":"discover","id":7}"#,
            &Handle::current(),
        );
        assert!(task.is_none());

        let (delivered, _) = collect(&channel);
        assert_eq!(delivered.len(), 1);
        let (endpoint, message) = &delivered[0];
        assert_eq!(*endpoint, EndpointId(2));
        match message {
            HostMessage::Capabilities { id, capabilities } => {
                assert_eq!(*id, 7);
                assert_eq!(capabilities["echo"], vec!["echo", "shout"]);
            }
            other => panic!("expected capabilities, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invoke_message_replies_after_the_task_completes() {
        let mut channel = BridgeChannel::new();
        channel.register("echo", Echo).unwrap();
        let channel = Arc::new(channel);
        channel.attach(EndpointId(1));

        let raw = r#"{"kind":"invoke","id":3,"capability":"echo","method":"shout","args":["yo"]}"#;
        let task = channel
            .handle_message(EndpointId(1), raw, &Handle::current())
            .expect("invoke spawns a task");
        task.await.unwrap();

        let (delivered, events) = collect(&channel);
        // Event first (emitted during the call), then the reply.
        assert_eq!(delivered.len(), 2);
        assert!(matches!(delivered[0].1, HostMessage::Event(_)));
        assert_eq!(delivered[1].1, HostMessage::reply(3, Ok(json!("yo"))));
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn invoke_errors_are_replied_not_raised() {
        let channel = Arc::new(BridgeChannel::new());
        channel.attach(EndpointId(1));

        let raw = r#"{"kind":"invoke","id":8,"capability":"missing","method":"x"}"#;
        channel
            .handle_message(EndpointId(1), raw, &Handle::current())
            .unwrap()
            .await
            .unwrap();

        let (delivered, _) = collect(&channel);
        assert_eq!(
            delivered[0].1,
            HostMessage::reply(8, Err(BridgeError::UnknownCapability("missing".into())))
        );
    }

    #[tokio::test]
    async fn messages_from_unattached_or_garbage_are_dropped() {
        let channel = Arc::new(BridgeChannel::new());
        assert!(channel
            .handle_message(EndpointId(9), r#"{"kind":"discover","id":1}"#, &Handle::current())
            .is_none());

        channel.attach(EndpointId(1));
        assert!(channel
            .handle_message(EndpointId(1), "{{{", &Handle::current())
            .is_none());
        assert_eq!(channel.pending(), 0);
    }
}
