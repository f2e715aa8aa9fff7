// src/services/query_service.rs

use crate::models::{Member, ServiceError, Team, TeamView};
use crate::utils::storage::Storage;
use log::debug;

// Rebuild the name snapshot from member rows so the view has one source of truth
fn with_members(mut team: Team, members: Vec<Member>) -> Result<TeamView, ServiceError> {
    let names: Vec<&str> = members.iter().map(|m| m.member_name.as_str()).collect();
    team.members = serde_json::to_string(&names)?;
    Ok(TeamView { team, members })
}

pub fn get_team_view(storage: &Storage, team_id: &str) -> Result<TeamView, ServiceError> {
    let team = storage
        .get_team(team_id)?
        .ok_or_else(ServiceError::team_not_found)?;
    let members = storage.get_members(team_id)?;

    debug!("Loaded team {} with {} members", team_id, members.len());
    with_members(team, members)
}

// Every team with its members, most recently updated first
pub fn get_admin_view(storage: &Storage) -> Result<Vec<TeamView>, ServiceError> {
    storage
        .list_teams_by_recency()?
        .into_iter()
        .map(|team| {
            let members = storage.get_members(&team.team_id)?;
            with_members(team, members)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MemberStatus, MemberUpdate};
    use crate::services::status_service;

    #[test]
    fn missing_team_is_not_found() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(
            get_team_view(&storage, "nope").unwrap_err(),
            ServiceError::team_not_found()
        );
    }

    #[test]
    fn admin_view_follows_latest_update() {
        let storage = Storage::open_in_memory().unwrap();
        let alpha = storage.create_team_and_members("Alpha", &["A".to_string()]).unwrap();
        let beta = storage.create_team_and_members("Beta", &["B".to_string()]).unwrap();

        let order = |views: Vec<TeamView>| views.into_iter().map(|v| v.team.team_id).collect::<Vec<_>>();
        assert_eq!(order(get_admin_view(&storage).unwrap()), vec![beta.clone(), alpha.clone()]);

        let a = storage.get_members(&alpha).unwrap()[0].member_id;
        status_service::update_members(
            &storage,
            &[MemberUpdate { member_id: a, status: MemberStatus { check_in: true, ..MemberStatus::default() } }],
        )
        .unwrap();

        let views = get_admin_view(&storage).unwrap();
        assert!(views[0].members[0].status.check_in);
        assert_eq!(order(views), vec![alpha, beta]);
    }

    #[test]
    fn snapshot_is_rebuilt_from_members() {
        let storage = Storage::open_in_memory().unwrap();
        let team_id = storage
            .create_team_and_members("Alpha", &["A".to_string(), "B".to_string()])
            .unwrap();

        let view = get_team_view(&storage, &team_id).unwrap();
        assert_eq!(view.team.member_names(), vec!["A", "B"]);
        assert_eq!(view.members.len(), 2);
    }
}
