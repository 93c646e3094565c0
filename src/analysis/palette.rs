//! Seeded k-means color quantization over opaque RGB samples

use crate::io::configuration::{CONVERGENCE_THRESHOLD, SnapConfig};
use crate::io::error::{Result, invalid_parameter};
use crate::math::random::{MtRandom, index_below, unit_float};
use crate::spatial::raster::Raster;
use log::debug;
use rand::RngCore;

/// RGB sample with floating-point channels
pub type Color = [f32; 3];

/// Squared Euclidean distance between two colors
// Unfused arithmetic keeps distances bit-stable across targets
#[allow(clippy::suboptimal_flops)]
pub fn squared_distance(a: Color, b: Color) -> f64 {
    let [ar, ag, ab] = a.map(f64::from);
    let [br, bg, bb] = b.map(f64::from);
    let (dr, dg, db) = (ar - br, ag - bg, ab - bb);
    dr * dr + dg * dg + db * db
}

/// Index of the closest centroid; ties go to the lowest index
pub fn nearest_index(centroids: &[Color], color: Color) -> usize {
    let mut best_index = 0;
    let mut best_distance = f64::INFINITY;
    for (index, &centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(color, centroid);
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }
    best_index
}

/// Collect the RGB channels of every pixel with non-zero alpha
pub fn opaque_samples(raster: &Raster) -> Vec<Color> {
    raster
        .pixels()
        .filter_map(|[red, green, blue, alpha]| {
            (alpha > 0).then(|| [red, green, blue].map(f32::from))
        })
        .collect()
}

/// Per-round accumulators reused across Lloyd iterations
struct Scratch {
    sums: Vec<Color>,
    counts: Vec<usize>,
    updated: Vec<Color>,
}

impl Scratch {
    fn new(k: usize) -> Self {
        Self {
            sums: vec![[0.0; 3]; k],
            counts: vec![0; k],
            updated: vec![[0.0; 3]; k],
        }
    }
}

/// Working set of opaque samples together with the current centroid set
#[derive(Debug, Clone)]
pub struct ColorClusters {
    samples: Vec<Color>,
    centroids: Vec<Color>,
}

impl ColorClusters {
    /// Pick `k` initial centroids with k-means++ seeding
    ///
    /// The first centroid is drawn uniformly; each further one is drawn with
    /// probability proportional to the squared distance to its nearest
    /// already-chosen centroid. When every sample coincides with a chosen
    /// centroid the draw falls back to a uniform pick.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `k` is 0 or exceeds the sample count
    pub fn seed_plus_plus<R: RngCore + ?Sized>(
        samples: Vec<Color>,
        k: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let count = samples.len();
        if k == 0 || k > count {
            return Err(invalid_parameter(
                "k",
                &k,
                &format!("must be between 1 and the opaque sample count ({count})"),
            ));
        }

        let mut centroids = Vec::with_capacity(k);
        let first = index_below(rng, count as f64)?;
        centroids.push(samples.get(first).copied().unwrap_or_default());

        // Stored as f32, compared and summed as f64
        let mut nearest = vec![f32::INFINITY; count];
        let mut last = centroids.first().copied().unwrap_or_default();

        for _ in 1..k {
            let mut total = 0.0;
            for (slot, &sample) in nearest.iter_mut().zip(&samples) {
                let distance = squared_distance(sample, last);
                let current = f64::from(*slot);
                let next = if distance < current { distance } else { current };
                *slot = next as f32;
                total += next;
            }

            let chosen = if total <= 0.0 {
                index_below(rng, count as f64)?
            } else {
                let target = unit_float(rng) * total;
                let mut running = 0.0;
                nearest
                    .iter()
                    .position(|&d| {
                        running += f64::from(d);
                        running >= target
                    })
                    .unwrap_or(0)
            };

            last = samples.get(chosen).copied().unwrap_or_default();
            centroids.push(last);
        }

        Ok(Self { samples, centroids })
    }

    /// Run Lloyd iterations until convergence or `max_iterations` rounds
    ///
    /// Returns the number of rounds performed.
    pub fn refine(&mut self, max_iterations: usize) -> usize {
        let mut scratch = Scratch::new(self.centroids.len());
        for round in 1..=max_iterations {
            let max_move = self.lloyd_round(&mut scratch);
            if max_move < CONVERGENCE_THRESHOLD {
                return round;
            }
        }
        max_iterations
    }

    /// One assignment and update pass; returns the largest squared centroid move
    fn lloyd_round(&mut self, scratch: &mut Scratch) -> f64 {
        scratch.sums.fill([0.0; 3]);
        scratch.counts.fill(0);

        for &sample in &self.samples {
            let index = nearest_index(&self.centroids, sample);
            if let (Some(sum), Some(count)) =
                (scratch.sums.get_mut(index), scratch.counts.get_mut(index))
            {
                for (channel, value) in sum.iter_mut().zip(sample) {
                    *channel += value;
                }
                *count += 1;
            }
        }

        let mut max_move: f64 = 0.0;
        let members = scratch.sums.iter().zip(&scratch.counts);
        for ((next, &current), (sum, &count)) in
            scratch.updated.iter_mut().zip(&self.centroids).zip(members)
        {
            *next = if count > 0 {
                let n = count as f64;
                sum.map(|channel| (f64::from(channel) / n) as f32)
            } else {
                current
            };
            max_move = max_move.max(squared_distance(*next, current));
        }

        self.centroids.copy_from_slice(&scratch.updated);
        max_move
    }

    /// Current centroid set, indexed by cluster id
    pub fn centroids(&self) -> &[Color] {
        &self.centroids
    }

    /// Centroids rounded to 8-bit channels
    pub fn palette(&self) -> Vec<[u8; 3]> {
        self.centroids.iter().map(|&c| to_channels(c)).collect()
    }

    /// Replace the RGB of every opaque pixel with its nearest centroid
    pub fn recolor(&self, raster: &Raster) -> Raster {
        let palette = self.palette();
        let mut output = raster.clone();
        for pixel in output.pixels_mut() {
            let Some((rgb, [alpha])) = pixel.split_first_chunk_mut::<3>() else {
                continue;
            };
            if *alpha == 0 {
                continue;
            }
            let index = nearest_index(&self.centroids, rgb.map(f32::from));
            if let Some(&mapped) = palette.get(index) {
                *rgb = mapped;
            }
        }
        output
    }
}

fn to_channels(color: Color) -> [u8; 3] {
    color.map(|c| c.round().clamp(0.0, 255.0) as u8)
}

/// Reduce the raster to at most `k_colors` opaque colors
///
/// Transparent pixels and every alpha value pass through untouched. A raster
/// without opaque pixels is returned as an unmodified copy.
///
/// # Errors
///
/// Returns `InvalidParameter` if `k_colors` is 0, or `InvalidRandomRange`
/// if seeding is asked to draw from an empty range
pub fn quantize(raster: &Raster, config: &SnapConfig) -> Result<Raster> {
    let samples = opaque_samples(raster);
    if samples.is_empty() {
        debug!("No opaque pixels, skipping quantization");
        return Ok(raster.clone());
    }

    let k = config.k_colors.min(samples.len());
    let opaque = samples.len();
    let mut rng = MtRandom::new(config.k_seed);
    let mut clusters = ColorClusters::seed_plus_plus(samples, k, &mut rng)?;
    let rounds = clusters.refine(config.max_kmeans_iterations);

    debug!("Quantized {opaque} opaque pixels into {k} clusters after {rounds} rounds");
    Ok(clusters.recolor(raster))
}
