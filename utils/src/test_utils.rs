use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, RwLock},
    thread::{self, ThreadId},
};

use miette::{Result, miette};

use crate::string;

#[allow(clippy::type_complexity)]
static ENV_VARS: LazyLock<Arc<RwLock<HashMap<(ThreadId, String), String>>>> =
    LazyLock::new(|| Arc::new(RwLock::new(HashMap::new())));

/// Test harness function for getting env variables.
///
/// Values are scoped to the calling thread so tests
/// running in parallel don't see each other's variables.
///
/// # Errors
/// Will error if the env variable doesn't exist.
///
/// # Panics
/// Will panic if the env var lock is poisoned.
pub fn get_env_var(key: &str) -> Result<String> {
    let thr_id = thread::current().id();

    let env_vars = ENV_VARS.read().unwrap();
    let key = (thr_id, string!(key));

    env_vars
        .get(&key)
        .map(ToOwned::to_owned)
        .inspect(|val| eprintln!("get: {key:?} = {val}"))
        .ok_or_else(|| miette!("Failed to retrieve env var '{key:?}'"))
}

/// Sets a thread-scoped env variable for the test harness.
///
/// # Panics
/// Will panic if the env var lock is poisoned.
pub fn set_env_var(key: &str, value: &str) {
    let thr_id = thread::current().id();

    let mut env_vars = ENV_VARS.write().unwrap();

    let key = (thr_id, string!(key));
    eprintln!("set: {key:?} = {value}");

    env_vars
        .entry(key)
        .and_modify(|val| {
            *val = string!(value);
        })
        .or_insert_with(|| string!(value));
}

/// Removes a thread-scoped env variable from the test harness.
///
/// # Panics
/// Will panic if the env var lock is poisoned.
pub fn unset_env_var(key: &str) {
    let thr_id = thread::current().id();

    eprintln!("unset: {key}");
    ENV_VARS.write().unwrap().remove(&(thr_id, string!(key)));
}
