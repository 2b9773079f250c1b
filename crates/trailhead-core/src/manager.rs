use crate::error::{Result, TrailheadError};
use crate::store::UserStore;
use crate::types::Role;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeSummary {
    pub user_id: u64,
    pub name: String,
    pub role: Role,
    pub warcoin: u64,
}

/// Staff working in the manager's city, trainees and employees only,
/// excluding the manager. Unreadable records are skipped.
pub fn employees_by_city(store: &UserStore, manager_id: u64) -> Result<Vec<EmployeeSummary>> {
    let manager = store.load(manager_id)?;
    manager.require_role(Role::Manager)?;
    let city = manager.city.as_deref().ok_or(TrailheadError::CityMissing)?;

    let mut employees = Vec::new();
    for id in store.list_ids()? {
        if id == manager_id {
            continue;
        }
        let Some(record) = store.try_load(id)? else {
            continue;
        };
        if record.city.as_deref() != Some(city) {
            continue;
        }
        if matches!(record.role, Role::Trainee | Role::Employee) {
            employees.push(EmployeeSummary {
                user_id: record.user_id,
                name: record.full_name(),
                role: record.role,
                warcoin: record.warcoin,
            });
        }
    }
    Ok(employees)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
