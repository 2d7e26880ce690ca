//! Attribute aliases.
//!
//! Keys are matched case-insensitively; targets are the canonical names
//! used on character sheets.

/// `(alias, canonical)` pairs.
pub const ALIASES: &[(&str, &str)] = &[
    // characteristics
    ("str", "力量"),
    ("dex", "敏捷"),
    ("pow", "意志"),
    ("con", "体质"),
    ("app", "外貌"),
    ("edu", "教育"),
    ("知识", "教育"),
    ("siz", "体型"),
    ("int", "智力"),
    ("灵感", "智力"),
    ("luck", "幸运"),
    ("运气", "幸运"),
    // derived
    ("san", "理智"),
    ("san值", "理智"),
    ("理智值", "理智"),
    ("sanmax", "理智上限"),
    ("hp", "体力"),
    ("生命", "体力"),
    ("生命值", "体力"),
    ("mp", "魔法"),
    ("魔法值", "魔法"),
    ("db", "伤害加值"),
    ("伤害奖励", "伤害加值"),
    ("build", "体格"),
    ("mov", "移动力"),
    // skills
    ("cm", "克苏鲁神话"),
    ("克苏鲁", "克苏鲁神话"),
    ("cr", "信用评级"),
    ("信用", "信用评级"),
    ("spot", "侦查"),
    ("listen", "聆听"),
    ("library", "图书馆使用"),
    ("图书馆", "图书馆使用"),
    ("dodge", "闪避"),
    ("brawl", "格斗"),
    ("斗殴", "格斗"),
    ("stealth", "潜行"),
    ("persuade", "说服"),
    ("psychology", "心理学"),
    ("firstaid", "急救"),
    ("计算机", "计算机使用"),
    ("电脑", "计算机使用"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique() {
        let mut seen = HashSet::new();
        for (alias, _) in ALIASES {
            assert!(seen.insert(alias.to_lowercase()), "duplicate alias {alias}");
        }
    }

    proptest! {
        #[test]
        fn every_alias_resolves_in_one_step(
            index in 0..ALIASES.len(),
            upper in any::<bool>(),
        ) {
            let ns = crate::namespace().unwrap();
            let (alias, canonical) = ALIASES[index];
            let typed = if upper { alias.to_uppercase() } else { alias.to_string() };
            let once = ns.resolve_alias(&typed);
            prop_assert_eq!(&once, canonical);
            prop_assert_eq!(ns.resolve_alias(&once), once);
        }
    }
}
