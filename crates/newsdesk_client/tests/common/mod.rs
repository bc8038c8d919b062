#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use newsdesk_client::{
    ApiClient, ClientSettings, CredentialStore, DismissHandle, DismissReason, Dismissal,
    Navigator, Notifier, SingleFlight,
};
use newsdesk_core::NotificationKind;
use tokio::sync::mpsc;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(desk_logging::initialize_for_tests);
}

/// Records every `show` and keeps the dismiss handles for the test to fire.
#[derive(Default)]
pub struct FakeNotifier {
    shown: Mutex<Vec<(String, NotificationKind)>>,
    handles: Mutex<Vec<DismissHandle>>,
}

impl FakeNotifier {
    pub fn shown(&self) -> Vec<(String, NotificationKind)> {
        self.shown.lock().unwrap().clone()
    }

    pub fn dismiss_all(&self) {
        for handle in self.handles.lock().unwrap().drain(..) {
            handle.dismiss(DismissReason::Acknowledged);
        }
    }
}

impl Notifier for FakeNotifier {
    fn show(&self, message: &str, kind: NotificationKind) -> Dismissal {
        let (handle, dismissal) = Dismissal::channel();
        self.shown.lock().unwrap().push((message.to_string(), kind));
        self.handles.lock().unwrap().push(handle);
        dismissal
    }

    fn hide(&self) {
        for handle in self.handles.lock().unwrap().drain(..) {
            handle.dismiss(DismissReason::Hidden);
        }
    }
}

pub struct FakeNavigator {
    tx: mpsc::UnboundedSender<()>,
}

impl FakeNavigator {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

impl Navigator for FakeNavigator {
    fn to_sign_in(&self) {
        let _ = self.tx.send(());
    }
}

pub struct Harness {
    pub client: ApiClient,
    pub credentials: CredentialStore,
    pub notifier: Arc<FakeNotifier>,
    pub latch: Arc<SingleFlight>,
    pub navigations: mpsc::UnboundedReceiver<()>,
}

pub fn harness(base_url: &str) -> Harness {
    init_logging();
    let credentials = CredentialStore::in_memory();
    let notifier = Arc::new(FakeNotifier::default());
    let (navigator, navigations) = FakeNavigator::new();
    let latch = SingleFlight::new();
    let client = ApiClient::with_session(
        &ClientSettings::with_base_url(base_url),
        credentials.clone(),
        notifier.clone(),
        navigator,
        latch.clone(),
    )
    .expect("client");
    Harness {
        client,
        credentials,
        notifier,
        latch,
        navigations,
    }
}

/// Polls until the latch is free, failing the test after a second.
pub async fn wait_for_release(latch: &SingleFlight) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while latch.is_held() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("latch released");
}
