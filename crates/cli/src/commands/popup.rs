//! `akasha popup` commands.

use akasha_storefront::config::StorefrontConfig;
use akasha_storefront::error::Result;
use akasha_storefront::session::welcome_popup::SHOW_DELAY;

use super::open_session;
use crate::PopupAction;
use crate::output;

pub fn run(config: &StorefrontConfig, action: &PopupAction) -> Result<()> {
    let mut session = open_session(config)?;
    let popup = &mut session.welcome_popup;

    if matches!(action, PopupAction::Dismiss) {
        popup.mark_seen();
    }

    if popup.should_show() {
        output::line(&format!(
            "Welcome popup will show {}s into the next visit",
            SHOW_DELAY.as_secs()
        ));
    } else {
        output::line("Welcome popup already seen");
    }
    Ok(())
}
