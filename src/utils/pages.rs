// checkin-service/src/utils/pages.rs
use crate::models::{Member, ServiceError, TeamView};
use log::error;
use serde::Serialize;
use tera::{Context, Tera};

pub const INDEX_HTML: &str = include_str!("../../templates/index.html");
pub const REGISTER_HTML: &str = include_str!("../../templates/register.html");
pub const DASHBOARD_HTML: &str = include_str!("../../templates/dashboard.html");
pub const SCRIPT_JS: &str = include_str!("../../static/script.js");

// `.html` names get tera's HTML autoescaping
const ADMIN_TEMPLATE: (&str, &str) = ("admin.html", include_str!("../../templates/admin.html"));

#[derive(Serialize)]
struct AdminEntry<'a> {
    team_name: &'a str,
    last_updated: String,
    members: &'a [Member],
}

fn template_error(err: tera::Error) -> ServiceError {
    error!("❌ Template rendering failed: {:?}", err);
    ServiceError::Storage(format!("Template rendering failed: {}", err))
}

// Admin listing, one section per team in the order given
pub fn render_admin(teams: &[TeamView]) -> Result<String, ServiceError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![ADMIN_TEMPLATE]).map_err(template_error)?;

    let teams_data: Vec<AdminEntry<'_>> = teams
        .iter()
        .map(|view| AdminEntry {
            team_name: &view.team.team_name,
            last_updated: view.team.last_updated.format("%Y-%m-%d %H:%M:%S").to_string(),
            members: &view.members,
        })
        .collect();

    let mut context = Context::new();
    context.insert("teams_data", &teams_data);

    tera.render(ADMIN_TEMPLATE.0, &context).map_err(template_error)
}
