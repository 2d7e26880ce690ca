//! Derived values.
//!
//! Each formula only applies when the sheet stores nothing under the
//! same name, so a stored current HP or MP shadows its starting value.

use tv_rules::formula::{Band, Overflow};
use tv_rules::{DependentValue, Formula, RuleNamespace, RuleResult};

/// Damage bonus and build bands over STR+DEX.
const BAND_LIMITS: [i64; 5] = [65, 85, 125, 165, 205];
/// Width of each step past the last band.
const OVERFLOW_STEP: i64 = 80;

/// Damage bonus: a dice expression picked from STR+DEX.
pub fn damage_bonus() -> RuleResult<Formula> {
    let values = ["-2", "-1", "0", "1d4", "1d6"];
    Ok(Formula::banded(
        "力量+敏捷",
        bands(values.map(|v| DependentValue::Dice(v.to_string()))),
        Overflow {
            start: BAND_LIMITS[4],
            step: OVERFLOW_STEP,
            offset: 2,
            die: Some(6),
        },
    )?)
}

/// Build: a number on the same bands as the damage bonus.
pub fn build() -> RuleResult<Formula> {
    Ok(Formula::banded(
        "力量+敏捷",
        bands([-2, -1, 0, 1, 2].map(DependentValue::Number)),
        Overflow {
            start: BAND_LIMITS[4],
            step: OVERFLOW_STEP,
            offset: 3,
            die: None,
        },
    )?)
}

fn bands(values: [DependentValue; 5]) -> Vec<Band> {
    BAND_LIMITS
        .into_iter()
        .zip(values)
        .map(|(below, value)| Band { below, value })
        .collect()
}

/// Register every derived value.
pub fn register(ns: &mut RuleNamespace) -> RuleResult<()> {
    ns.add_formula("体力", Formula::arithmetic("(体型+体质)/10")?)?;
    ns.add_formula("魔法", Formula::arithmetic("意志/10")?)?;
    ns.add_formula("理智上限", Formula::arithmetic("99-克苏鲁神话")?)?;
    ns.add_formula("伤害加值", damage_bonus()?)?;
    ns.add_formula("体格", build()?)?;
    ns.add_formula("闪避", Formula::arithmetic("敏捷/2")?)?;
    ns.add_formula("母语", Formula::arithmetic("教育")?)?;
    Ok(())
}
