use crate::parse::robtarget::POSE_LEN;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundsError {
    #[error("geen seedpunten: bereik is niet gedefinieerd")]
    Empty,
}

/// Per-dimensie minimum en maximum over alle seed-poses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f64; POSE_LEN],
    pub max: [f64; POSE_LEN],
}

impl Bounds {
    /// Berekent het bereik per dimensie. Een lege invoer is een fout.
    pub fn from_poses<'a, I>(poses: I) -> Result<Self, BoundsError>
    where
        I: IntoIterator<Item = &'a [f64; POSE_LEN]>,
    {
        let mut poses = poses.into_iter();
        let first = poses.next().ok_or(BoundsError::Empty)?;

        let mut bounds = Self {
            min: *first,
            max: *first,
        };
        for pose in poses {
            for (axis, value) in pose.iter().enumerate() {
                bounds.min[axis] = bounds.min[axis].min(*value);
                bounds.max[axis] = bounds.max[axis].max(*value);
            }
        }

        log::debug!("bereik min={:?} max={:?}", bounds.min, bounds.max);
        Ok(bounds)
    }

    /// `(min, max)` voor dimensie `axis` (0..7).
    #[must_use]
    pub fn axis(&self, axis: usize) -> (f64, f64) {
        (self.min[axis], self.max[axis])
    }

    /// Diagonaal van het positie-deel van het bereik.
    #[must_use]
    pub fn position_diagonal(&self) -> f64 {
        super::distance(
            [self.min[0], self.min[1], self.min[2]],
            [self.max[0], self.max[1], self.max[2]],
        )
    }
}
