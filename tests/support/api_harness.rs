//! A Tokio runtime and Wiremock GitHub API shared by the steps of one
//! scenario.

use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

/// Runtime and mock server pair; cheap to clone into step functions.
#[derive(Clone)]
pub struct ApiHarness {
    runtime: Rc<Runtime>,
    server: Rc<MockServer>,
}

impl ApiHarness {
    /// Starts a runtime and a mock server on it.
    pub fn start() -> io::Result<Self> {
        let runtime = Runtime::new()?;
        let server = runtime.block_on(MockServer::start());
        Ok(Self {
            runtime: Rc::new(runtime),
            server: Rc::new(server),
        })
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn mount(&self, mock: Mock) {
        self.block_on(mock.mount(&self.server));
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Requests received so far; empty when recording is disabled.
    pub fn received_requests(&self) -> Vec<Request> {
        self.block_on(self.server.received_requests())
            .unwrap_or_default()
    }
}

/// Returns the scenario's harness, starting it on first use.
pub fn ensure_harness(slot: &Slot<ApiHarness>) -> io::Result<ApiHarness> {
    if let Some(harness) = slot.get() {
        return Ok(harness);
    }
    let harness = ApiHarness::start()?;
    slot.set(harness.clone());
    Ok(harness)
}
