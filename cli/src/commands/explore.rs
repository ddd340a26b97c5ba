//! `agentmart explore`: browse pre-built teams.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::explore;

/// Run the explore command.
///
/// # Errors
///
/// Returns an error if the teams cannot be loaded.
pub async fn run(app: &AppContext) -> Result<()> {
    let reporter = app.reporter();
    let teams = explore::list_prebuilt(&app.api, &reporter).await?;
    reporter.finish();
    app.renderer().render_prebuilt(&teams)
}
