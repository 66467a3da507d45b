use super::Aggregate;

/// Extremes and average of an aggregate, as shown next to a choropleth.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub max: (String, f64), // (group label, value)
    pub min: (String, f64),
    pub mean: f64,          // Unweighted mean of the group means
}

impl Aggregate {
    /// Highest, lowest and average group value. `None` when there is nothing to show.
    /// Ties go to the group seen first.
    pub fn summary(&self) -> Option<Summary> {
        let first = self.rows.first()?;
        let (mut max, mut min) = (first, first);
        for row in &self.rows[1..] {
            if row.mean_value > max.mean_value { max = row }
            if row.mean_value < min.mean_value { min = row }
        }
        let mean = self.rows.iter().map(|row| row.mean_value).sum::<f64>() / self.rows.len() as f64;

        Some(Summary {
            max: (max.group_label.clone(), max.mean_value),
            min: (min.group_label.clone(), min.mean_value),
            mean,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::aggregate::aggregate;
    use crate::resolve::Resolver;
    use crate::table::{resolve_records, RawRecord};
    use crate::taxonomy::TRANSPORT;

    #[test]
    fn extremes_and_mean() {
        let raw = [
            RawRecord::number("Skåne", 10.0),
            RawRecord::number("Norrbotten", 2.0),
            RawRecord::number("Gotland", 6.0),
            RawRecord::number("Stockholm", 10.0),
        ];
        let records = resolve_records(&raw, &Resolver::default(), "v").0;
        let summary = aggregate(&records, &TRANSPORT).summary().unwrap();

        assert_eq!(summary.max, ("Syd".to_string(), 10.0));
        assert_eq!(summary.min, ("Norr".to_string(), 2.0));
        assert_eq!(summary.mean, 6.0);
    }

    #[test]
    fn empty_has_no_summary() {
        let records = resolve_records(&[RawRecord::number("99", 1.0)], &Resolver::default(), "v").0;
        assert!(aggregate(&records, &TRANSPORT).summary().is_none());
    }
}
