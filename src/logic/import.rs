//! Roster import from CSV: one player per row under a `name` header.

use crate::models::{name_key, Player, ScoreError, Workspace};
use std::collections::HashSet;
use std::io::Read;

/// Read player names from CSV. The header row must contain a `name` column; other
/// columns are ignored and blank names are skipped.
pub fn read_roster_csv<R: Read>(reader: R) -> Result<Vec<String>, ScoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| ScoreError::Import(e.to_string()))?;
    let col = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("name"))
        .ok_or_else(|| ScoreError::Import("missing 'name' column".to_string()))?;

    let mut names = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| ScoreError::Import(e.to_string()))?;
        match record.get(col) {
            Some(name) if !name.is_empty() => names.push(name.to_string()),
            _ => {}
        }
    }
    Ok(names)
}

/// Add every player from the CSV to the workspace, in file order.
///
/// All names are checked first (against the roster and each other); if any is rejected
/// nothing is added.
pub fn import_roster_csv<R: Read>(
    workspace: &mut Workspace,
    reader: R,
) -> Result<Vec<Player>, ScoreError> {
    let names = read_roster_csv(reader)?;
    let mut seen = HashSet::with_capacity(names.len());
    for name in &names {
        workspace.validate_name(name, None)?;
        if !seen.insert(name_key(name)) {
            return Err(ScoreError::DuplicatePlayerName);
        }
    }
    let mut added = Vec::with_capacity(names.len());
    for name in names {
        added.push(workspace.add_player(name)?.clone());
    }
    log::info!("Imported {} player(s) into workspace {}", added.len(), workspace.id);
    Ok(added)
}
