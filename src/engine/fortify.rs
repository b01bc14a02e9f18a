//! Fortify: the fallback action of every decision step

use crate::core::error::Result;
use crate::core::types::FactionId;
use crate::engine::context::missing_control;
use crate::engine::dice::Dice;
use crate::engine::rules::TurnRules;
use crate::galaxy::system::StarSystem;
use crate::news::NewsFeed;
use crate::turns::record::TurnRecord;

/// Raise `faction`'s control on `system` by a fortify roll, capped at
/// `upper_border`. Control already at or above the border is left alone,
/// but the action and its news line are recorded either way.
pub fn fortify(
    system: &mut StarSystem,
    faction: &FactionId,
    rules: &TurnRules,
    upper_border: i32,
    news: &mut NewsFeed,
    record: &mut TurnRecord,
    dice: &mut dyn Dice,
) -> Result<()> {
    record.record_fortify();

    let name = system.name.clone();
    let control = system
        .control_of_mut(faction)
        .ok_or_else(|| missing_control(faction, &name))?;

    if control.percentage < upper_border {
        let gain = dice.range_inclusive(rules.min_fortify_change, rules.max_fortify_change);
        control.percentage = (control.percentage + gain).min(upper_border).min(100);
    }

    news.push(format!(
        "{} fortifying on {}. Control now {}",
        faction, name, control.percentage
    ));
    Ok(())
}
