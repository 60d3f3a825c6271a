use crate::{
    row::Row,
    session::{BackendError, Connection, ConnectionProvider, ExecResult},
    value::Value,
};
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

///
/// Reply
///
/// Scripted backend reply for one statement, consumed in order.
///

pub enum Reply {
    Exec(ExecResult),
    Rows(Vec<Row>),
    Fail(&'static str),
}

///
/// ScriptState
///
/// Shared between provider and checked-out connections so tests can
/// assert the executed statement stream and the acquire/release pairing.
///

#[derive(Default)]
pub struct ScriptState {
    replies: VecDeque<Reply>,
    pub statements: Vec<(String, Vec<Value>)>,
    pub acquires: u32,
    pub releases: u32,
}

///
/// ScriptedProvider
///

#[derive(Clone, Default)]
pub struct ScriptedProvider {
    state: Rc<RefCell<ScriptState>>,
    fail_acquire: bool,
}

impl ScriptedProvider {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ScriptState {
                replies: replies.into_iter().collect(),
                ..ScriptState::default()
            })),
            fail_acquire: false,
        }
    }

    pub fn failing_acquire() -> Self {
        Self {
            fail_acquire: true,
            ..Self::default()
        }
    }

    pub fn statements(&self) -> Vec<(String, Vec<Value>)> {
        self.state.borrow().statements.clone()
    }

    pub fn acquires(&self) -> u32 {
        self.state.borrow().acquires
    }

    pub fn releases(&self) -> u32 {
        self.state.borrow().releases
    }
}

impl ConnectionProvider for ScriptedProvider {
    type Conn = ScriptedConn;

    fn acquire(&self) -> Result<Self::Conn, BackendError> {
        if self.fail_acquire {
            return Err(BackendError::new("no connection available"));
        }
        self.state.borrow_mut().acquires += 1;
        Ok(ScriptedConn {
            state: Rc::clone(&self.state),
        })
    }

    fn release(&self, _conn: Self::Conn) {
        self.state.borrow_mut().releases += 1;
    }
}

///
/// ScriptedConn
///

pub struct ScriptedConn {
    state: Rc<RefCell<ScriptState>>,
}

impl Connection for ScriptedConn {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<ExecResult, BackendError> {
        let mut state = self.state.borrow_mut();
        state.statements.push((sql.to_string(), params.to_vec()));
        match state.replies.pop_front() {
            Some(Reply::Exec(result)) => Ok(result),
            Some(Reply::Fail(message)) => Err(BackendError::new(message)),
            Some(Reply::Rows(_)) => Err(BackendError::new("script expected an execute")),
            None => Ok(ExecResult {
                rows_affected: 1,
                generated_key: None,
            }),
        }
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>, BackendError> {
        let mut state = self.state.borrow_mut();
        state.statements.push((sql.to_string(), params.to_vec()));
        match state.replies.pop_front() {
            Some(Reply::Rows(rows)) => Ok(rows),
            Some(Reply::Fail(message)) => Err(BackendError::new(message)),
            Some(Reply::Exec(_)) => Err(BackendError::new("script expected a query")),
            None => Ok(Vec::new()),
        }
    }

    fn begin(&mut self) -> Result<(), BackendError> {
        Ok(())
    }

    fn commit(&mut self) -> Result<(), BackendError> {
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), BackendError> {
        Ok(())
    }
}
