//! Settings display formatting

use crate::models::{Language, Money, Settings};

/// All settings, with per-language amounts and the FX table
pub fn format_settings(settings: &Settings, pending: Money, pending_currency: &str) -> String {
    let language = settings.language;
    let mut output = String::new();

    output.push_str(&format!(
        "Language:       {} ({})\n",
        language,
        settings.active_currency()
    ));
    output.push_str(&format!("At maximum:     {}\n", settings.max_behavior));
    output.push_str(&format!(
        "Reminder:       {:02}:{:02} ({})\n",
        settings.reminder_hour,
        settings.reminder_minute,
        if settings.notifications_enabled {
            "on"
        } else {
            "off"
        }
    ));
    output.push_str(&format!(
        "Next allowance: {}\n",
        pending.format(pending_currency, language)
    ));

    output.push_str("\nAmounts:\n");
    for lang in Language::ALL {
        let currency = settings.currency_for(lang);
        output.push_str(&format!(
            "  {}  start {:>18}  max {:>22}\n",
            lang,
            settings.start_amount_for(lang).format(currency, language),
            settings.max_amount_for(lang).format(currency, language),
        ));
    }

    if !settings.approx_fx_table.is_empty() {
        output.push_str("\nApproximate rates:\n");
        for (pair, rate) in &settings.approx_fx_table {
            output.push_str(&format!("  {:<10} {}\n", pair, rate));
        }
    }

    output
}
