use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tank_bt::{BtError, BtNode, BtStatus};
use tank_core::TickContext;

use super::TestArena;

pub type EventLog = Rc<RefCell<Vec<String>>>;

/// Leaf that records its lifecycle calls and is steered through shared flags.
pub struct Probe {
    pub name: &'static str,
    pub ready: Rc<Cell<bool>>,
    pub keep_running: Rc<Cell<bool>>,
    pub log: EventLog,
}

#[derive(Clone)]
pub struct ProbeHandle {
    pub ready: Rc<Cell<bool>>,
    pub keep_running: Rc<Cell<bool>>,
}

impl Probe {
    pub fn new(name: &'static str, log: &EventLog) -> (Box<dyn BtNode<TestArena>>, ProbeHandle) {
        let handle = ProbeHandle {
            ready: Rc::new(Cell::new(true)),
            keep_running: Rc::new(Cell::new(true)),
        };
        let probe = Probe {
            name,
            ready: handle.ready.clone(),
            keep_running: handle.keep_running.clone(),
            log: log.clone(),
        };
        (Box::new(probe), handle)
    }

    fn record(&self, event: &str) {
        self.log.borrow_mut().push(format!("{event}:{}", self.name));
    }
}

impl BtNode<TestArena> for Probe {
    fn name(&self) -> &str {
        self.name
    }

    fn decide(&self, _ctx: &TickContext, _agent: u64, _world: &TestArena) -> bool {
        self.ready.get()
    }

    fn activate(&mut self, _ctx: &TickContext, _agent: u64, _world: &mut TestArena) {
        self.record("activate");
    }

    fn tick(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        _world: &mut TestArena,
    ) -> Result<BtStatus, BtError> {
        self.record("tick");
        Ok(BtStatus::from(self.keep_running.get()))
    }

    fn deactivate(&mut self, _ctx: &TickContext, _agent: u64, _world: &mut TestArena) {
        self.record("deactivate");
    }
}

pub fn take(log: &EventLog) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}
