//! Bouts of madness.
//!
//! Two fixed 1D10 tables: symptoms acted out at the table in real time,
//! and a summary of what happened while the investigator was not in
//! control. Each bout also rolls a 1D10 duration.

use serde::Serialize;
use tv_mechanics::DiceSource;

/// Which table to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MadnessKind {
    /// Symptoms played out now, lasting rounds.
    RealTime,
    /// What happened off screen, lasting hours.
    Summary,
}

impl MadnessKind {
    /// The table for this kind.
    pub fn table(self) -> &'static [Symptom; 10] {
        match self {
            Self::RealTime => &REAL_TIME,
            Self::Summary => &SUMMARY,
        }
    }

    /// Duration unit.
    pub fn unit(self) -> &'static str {
        match self {
            Self::RealTime => "轮",
            Self::Summary => "小时",
        }
    }

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::RealTime => "即时症状",
            Self::Summary => "总结症状",
        }
    }
}

/// One table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Symptom {
    /// Short name.
    pub name: &'static str,
    /// What the investigator goes through.
    pub description: &'static str,
}

/// A rolled bout of madness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MadnessBout {
    /// The table drawn from.
    pub kind: MadnessKind,
    /// The 1D10 table roll.
    pub roll: u32,
    /// The symptom rolled.
    pub symptom: Symptom,
    /// The 1D10 duration, in the kind's unit.
    pub duration: u32,
}

impl std::fmt::Display for MadnessBout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "疯狂发作（{}）：1D10={} {}\n{}\n持续 1D10={} {}",
            self.kind.label(),
            self.roll,
            self.symptom.name,
            self.symptom.description,
            self.duration,
            self.kind.unit()
        )
    }
}

/// Roll a bout of madness.
pub fn roll_bout(kind: MadnessKind, dice: &mut dyn DiceSource) -> MadnessBout {
    let table = kind.table();
    let roll = dice.roll(table.len() as u32);
    let symptom = table[(roll.saturating_sub(1) as usize).min(table.len() - 1)];
    let duration = dice.roll(10);
    MadnessBout {
        kind,
        roll,
        symptom,
        duration,
    }
}

/// Real-time symptoms.
pub const REAL_TIME: [Symptom; 10] = [
    Symptom {
        name: "失忆",
        description: "调查员完全不记得自上一个安全地点以来发生的事，也想不起自己为何在此。",
    },
    Symptom {
        name: "假性残疾",
        description: "调查员陷入心因性的失明、失聪或肢体失能之中。",
    },
    Symptom {
        name: "暴力倾向",
        description: "调查员被狂怒吞没，不分敌我地攻击身边的人。",
    },
    Symptom {
        name: "偏执",
        description: "调查员坚信所有人都在暗中与自己作对，拒绝任何帮助。",
    },
    Symptom {
        name: "人际依赖",
        description: "调查员把在场的某人误认作生命中最重要的人，并据此行事。",
    },
    Symptom {
        name: "昏厥",
        description: "调查员当场晕倒，不省人事。",
    },
    Symptom {
        name: "逃避行为",
        description: "调查员用尽一切手段逃离当前所在之处，哪怕要开走唯一的载具。",
    },
    Symptom {
        name: "歇斯底里",
        description: "调查员大笑、大哭或尖叫不止，无法做出其他行动。",
    },
    Symptom {
        name: "恐惧",
        description: "调查员突然对某样东西产生强烈的恐惧，即使它并不在场也会想象它就在身边。",
    },
    Symptom {
        name: "躁狂",
        description: "调查员被一种难以抑制的冲动支配，必须立刻去做某件事。",
    },
];

/// Summary symptoms.
pub const SUMMARY: [Symptom; 10] = [
    Symptom {
        name: "失忆",
        description: "调查员在陌生的地方回过神来，连自己是谁都想不起来，记忆会慢慢恢复。",
    },
    Symptom {
        name: "被窃",
        description: "调查员醒来时身无分文，随身携带的贵重物品全都不见了。",
    },
    Symptom {
        name: "遍体鳞伤",
        description: "调查员醒来时浑身是伤，体力只剩一半，但没有重伤。",
    },
    Symptom {
        name: "精神暴力",
        description: "调查员在失控期间伤害了他人，事后只留下零碎的记忆。",
    },
    Symptom {
        name: "极端信念",
        description: "调查员以极端方式践行自己的某条信念，例如在街头布道。",
    },
    Symptom {
        name: "重要之人",
        description: "调查员不顾一切地去接近生命中最重要的那个人。",
    },
    Symptom {
        name: "被收容",
        description: "调查员在精神病院或警局的拘留室中醒来。",
    },
    Symptom {
        name: "逃避行为",
        description: "调查员醒来时已身处远方，可能在荒野，也可能在另一座城市。",
    },
    Symptom {
        name: "恐惧",
        description: "调查员获得一种新的恐惧症，并在失控期间一直躲避着它。",
    },
    Symptom {
        name: "躁狂",
        description: "调查员获得一种新的躁狂症，并在失控期间一直沉溺其中。",
    },
];
