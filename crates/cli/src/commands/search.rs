//! `akasha search` command.

use akasha_storefront::config::StorefrontConfig;
use akasha_storefront::error::{AppError, Result};

use super::{open_catalog, open_session};
use crate::output;

pub fn run(
    config: &StorefrontConfig,
    term: Option<&str>,
    recent: bool,
    clear_recent: bool,
) -> Result<()> {
    let mut session = open_session(config)?;
    let searches = &mut session.recent_searches;

    if clear_recent {
        searches.clear();
    }

    if recent || clear_recent {
        output::terms("Recent searches", searches.terms());
        return Ok(());
    }

    let term = term
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("search term is required".to_string()))?;

    let catalog = open_catalog(config)?;
    let results: Vec<_> = catalog.search(term).into_iter().cloned().collect();
    searches.record(term);

    output::products(&format!("Results for \"{}\"", term.trim()), &results);
    Ok(())
}
