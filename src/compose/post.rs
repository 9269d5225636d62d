use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::compose::brand::{BrandKit, PostPlan};
use crate::compose::slides::{Slide, compose_headline, compose_overlay};
use crate::foundation::core::Canvas;
use crate::foundation::error::{SlideError, SlideResult};
use crate::text::measure::TextPainter;

/// How the slides of a post are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    /// Render slides on a rayon pool instead of one after another.
    pub parallel: bool,
    /// Worker count for the pool; rayon's default when unset.
    pub threads: Option<usize>,
}

fn build_thread_pool(threads: Option<usize>) -> SlideResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SlideError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

/// Render every slide of `plan`: the headline first, then one overlay per `plan.slides` entry on
/// the background with the same position. A `None` or absent background fails that slide only.
///
/// Returns one result per slide so a bad background or text never loses the other slides. The
/// outer error only reports an unusable `threading` configuration. Parallel and sequential runs
/// produce identical slides.
#[tracing::instrument(
    level = "info",
    skip(plan, backgrounds, brand, painter),
    fields(slides = plan.slides.len() + 1, parallel = threading.parallel)
)]
pub fn compose_post(
    plan: &PostPlan,
    backgrounds: &[Option<Canvas>],
    brand: &BrandKit,
    painter: &dyn TextPainter,
    threading: RenderThreading,
) -> SlideResult<Vec<SlideResult<Slide>>> {
    let brand = plan.hints.apply(brand);
    let total = plan.slides.len() + 1;

    let render_one = |index: usize| -> SlideResult<Slide> {
        if index == 0 {
            return compose_headline(&plan.headline, &brand, painter);
        }
        let content = &plan.slides[index - 1];
        let background = backgrounds
            .get(index - 1)
            .and_then(Option::as_ref)
            .ok_or_else(|| {
                SlideError::validation(format!("slide {index} has no background image"))
            })?;
        compose_overlay(content, background, index, &brand, painter)
    };

    let results: Vec<SlideResult<Slide>> = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| (0..total).into_par_iter().map(render_one).collect())
    } else {
        (0..total).map(render_one).collect()
    };

    for (index, result) in results.iter().enumerate() {
        if let Err(err) = result {
            tracing::warn!(index, error = %err, "slide failed");
        }
    }
    Ok(results)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/post.rs"]
mod tests;
