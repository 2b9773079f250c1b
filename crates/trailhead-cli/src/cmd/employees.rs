use crate::output::{print_json, print_table};
use std::path::Path;
use trailhead_core::manager;
use trailhead_core::store::UserStore;

pub fn run(root: &Path, manager_id: u64, json: bool) -> anyhow::Result<()> {
    let store = UserStore::new(root);
    let employees = manager::employees_by_city(&store, manager_id)?;

    if json {
        print_json(&employees)?;
        return Ok(());
    }
    if employees.is_empty() {
        println!("No staff in your city.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = employees
        .iter()
        .map(|e| {
            vec![
                e.user_id.to_string(),
                e.name.clone(),
                e.role.to_string(),
                e.warcoin.to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "ROLE", "WARCOIN"], &rows);
    Ok(())
}
