use crate::error::RunError;

pub type CoreId = core_affinity::CoreId;

pub fn get_core_ids() -> Option<Vec<CoreId>> {
    core_affinity::get_core_ids()
}

pub fn set_for_current(core_id: CoreId) -> bool {
    core_affinity::set_for_current(core_id)
}

/// Pins the current thread to the core with the given index in [`get_core_ids`].
pub fn pin_current_thread(index: usize) -> Result<CoreId, RunError> {
    let core = get_core_ids()
        .and_then(|cores| cores.get(index).copied())
        .ok_or(RunError::CoreUnavailable(index))?;

    if !set_for_current(core) {
        return Err(RunError::CoreUnavailable(index));
    }

    Ok(core)
}
