use std::str::FromStr;

use anyhow::{bail, Result};

use super::region::{by_name, regions, BaseRegion};

/// The two fixed ways the counties are partitioned into larger regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionKind {
    Nuts2,      // EU statistical regions (8 groups)
    Transport,  // Transport-authority regions (6 groups)
}

impl PartitionKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            PartitionKind::Nuts2 => "nuts2",
            PartitionKind::Transport => "transport",
        }
    }

    /// The static partition table for this kind.
    pub fn partition(&self) -> &'static Partition {
        match self {
            PartitionKind::Nuts2 => &NUTS2,
            PartitionKind::Transport => &TRANSPORT,
        }
    }

    pub fn order() -> [PartitionKind; 2] {
        [PartitionKind::Nuts2, PartitionKind::Transport]
    }
}

impl FromStr for PartitionKind {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "nuts2" => Ok(PartitionKind::Nuts2),
            "transport" => Ok(PartitionKind::Transport),
            _ => bail!("[taxonomy] Unknown partition: {name}"),
        }
    }
}

/// A total assignment of every county to exactly one group label.
#[derive(Debug)]
pub struct Partition {
    kind: PartitionKind,
    assignments: &'static [(&'static str, &'static str)], // (county name, group label)
    ids: &'static [(&'static str, &'static str)],         // (group label, official id)
}

/// NUTS-2 ids and their names, used when a NUTS feed carries ids but no names.
pub static NUTS_ID_TO_NAME: [(&str, &str); 8] = [
    ("SE11", "Stockholm"),
    ("SE12", "Östra Mellansverige"),
    ("SE21", "Småland med öarna"),
    ("SE22", "Sydsverige"),
    ("SE23", "Västsverige"),
    ("SE31", "Norra Mellansverige"),
    ("SE32", "Mellersta Norrland"),
    ("SE33", "Övre Norrland"),
];

pub static NUTS2: Partition = Partition {
    kind: PartitionKind::Nuts2,
    assignments: &[
        ("Stockholm", "SE11 Stockholm"),
        ("Uppsala", "SE12 Östra Mellansverige"),
        ("Södermanland", "SE12 Östra Mellansverige"),
        ("Östergötland", "SE12 Östra Mellansverige"),
        ("Örebro", "SE12 Östra Mellansverige"),
        ("Västmanland", "SE12 Östra Mellansverige"),
        ("Jönköping", "SE21 Småland med öarna"),
        ("Kronoberg", "SE21 Småland med öarna"),
        ("Kalmar", "SE21 Småland med öarna"),
        ("Gotland", "SE21 Småland med öarna"),
        ("Blekinge", "SE22 Sydsverige"),
        ("Skåne", "SE22 Sydsverige"),
        ("Halland", "SE23 Västsverige"),
        ("Västra Götaland", "SE23 Västsverige"),
        ("Värmland", "SE31 Norra Mellansverige"),
        ("Dalarna", "SE31 Norra Mellansverige"),
        ("Gävleborg", "SE31 Norra Mellansverige"),
        ("Västernorrland", "SE32 Mellersta Norrland"),
        ("Jämtland", "SE32 Mellersta Norrland"),
        ("Västerbotten", "SE33 Övre Norrland"),
        ("Norrbotten", "SE33 Övre Norrland"),
    ],
    ids: &[
        ("SE11 Stockholm", "SE11"),
        ("SE12 Östra Mellansverige", "SE12"),
        ("SE21 Småland med öarna", "SE21"),
        ("SE22 Sydsverige", "SE22"),
        ("SE23 Västsverige", "SE23"),
        ("SE31 Norra Mellansverige", "SE31"),
        ("SE32 Mellersta Norrland", "SE32"),
        ("SE33 Övre Norrland", "SE33"),
    ],
};

pub static TRANSPORT: Partition = Partition {
    kind: PartitionKind::Transport,
    assignments: &[
        ("Skåne", "Syd"),
        ("Kronoberg", "Syd"),
        ("Blekinge", "Syd"),
        ("Västernorrland", "Norr"),
        ("Jämtland", "Norr"),
        ("Västerbotten", "Norr"),
        ("Norrbotten", "Norr"),
        ("Uppsala", "Mitt"),
        ("Södermanland", "Mitt"),
        ("Västmanland", "Mitt"),
        ("Värmland", "Mitt"),
        ("Örebro", "Mitt"),
        ("Dalarna", "Mitt"),
        ("Gävleborg", "Mitt"),
        ("Stockholm", "Öst"),
        ("Gotland", "Öst"),
        ("Halland", "Väst"),
        ("Västra Götaland", "Väst"),
        ("Jönköping", "Sydöst"),
        ("Kalmar", "Sydöst"),
        ("Östergötland", "Sydöst"),
    ],
    ids: &[
        ("Syd", "26"),
        ("Norr", "27"),
        ("Mitt", "28"),
        ("Öst", "29"),
        ("Väst", "30"),
        ("Sydöst", "31"),
    ],
};

impl Partition {
    #[inline] pub fn kind(&self) -> PartitionKind { self.kind }

    /// Group label of the county with the given canonical name.
    pub fn group_of(&self, name: &str) -> Option<&'static str> {
        self.assignments.iter()
            .find(|(county, _)| *county == name)
            .map(|&(_, label)| label)
    }

    /// Group labels in declaration order, each listed once.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels: Vec<&'static str> = Vec::new();
        for &(_, label) in self.assignments {
            if !labels.contains(&label) { labels.push(label) }
        }
        labels
    }

    /// Counties assigned to `label`, in declaration order.
    pub fn members(&self, label: &str) -> Vec<&'static BaseRegion> {
        self.assignments.iter()
            .filter(|(_, group)| *group == label)
            .filter_map(|(county, _)| by_name(county))
            .collect()
    }

    /// Official identifier of a group ("SE12" for NUTS-2, "28" for transport regions).
    pub fn id_of(&self, label: &str) -> Option<&'static str> {
        self.ids.iter()
            .find(|(group, _)| *group == label)
            .map(|&(_, id)| id)
    }

    /// Group label carrying the official identifier `id`.
    pub fn label_of_id(&self, id: &str) -> Option<&'static str> {
        self.ids.iter()
            .find(|(_, group_id)| *group_id == id)
            .map(|&(label, _)| label)
    }

    /// Check that every county is assigned exactly once and every assigned name is a county.
    pub fn validate(&self) -> Result<()> {
        for region in regions() {
            let count = self.assignments.iter().filter(|(county, _)| *county == region.name).count();
            if count != 1 {
                bail!("[taxonomy] {} assigns {} {count} times", self.kind.to_str(), region.name);
            }
        }
        for (county, _) in self.assignments {
            if by_name(county).is_none() {
                bail!("[taxonomy] {} assigns unknown county {county}", self.kind.to_str());
            }
        }
        Ok(())
    }
}
