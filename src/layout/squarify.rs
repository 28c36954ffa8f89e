use super::Rect;

/// Squarified layout (Bruls, Huizing & van Wijk).
///
/// Returns one rectangle per weight, in input order. Areas are proportional to
/// the weights and together they tile `bounds`. Items are placed largest first;
/// each row grows along the shorter side of the remaining space for as long as
/// that does not make its worst aspect ratio any worse.
///
/// Non-positive and non-finite weights count as 0 and get a zero-area strip.
/// If nothing has positive weight (or `bounds` has no area) every rectangle is
/// the empty one at `bounds`' origin.
pub fn squarify(weights: &[f64], bounds: Rect) -> Vec<Rect> {
    let origin = Rect::new(bounds.x, bounds.y, 0.0, 0.0);
    let mut result = vec![origin; weights.len()];

    let clean: Vec<f64> = weights
        .iter()
        .map(|&w| if w.is_finite() && w > 0.0 { w } else { 0.0 })
        .collect();
    let total: f64 = clean.iter().sum();
    let area = bounds.area();
    if total <= 0.0 || !(area > 0.0) {
        return result;
    }

    // Normalized areas, largest first. Stable, so equal weights keep input order.
    let scale = area / total;
    let mut order: Vec<usize> = (0..clean.len()).collect();
    order.sort_by(|&a, &b| clean[b].total_cmp(&clean[a]));
    let areas: Vec<f64> = order.iter().map(|&i| clean[i] * scale).collect();

    let mut remaining = bounds;
    let mut start = 0;
    let mut row_sum = 0.0;
    let mut next = 0;

    while next < areas.len() {
        if next == start {
            row_sum = areas[next];
            next += 1;
            continue;
        }

        let side = remaining.w.min(remaining.h);
        let current = worst_aspect_ratio(&areas[start..next], row_sum, side);
        let grown = worst_aspect_ratio(&areas[start..=next], row_sum + areas[next], side);
        if grown <= current {
            row_sum += areas[next];
            next += 1;
        } else {
            place_row(
                &areas[start..next],
                &order[start..next],
                row_sum,
                false,
                &mut remaining,
                &mut result,
            );
            start = next;
        }
    }

    place_row(
        &areas[start..],
        &order[start..],
        row_sum,
        true,
        &mut remaining,
        &mut result,
    );

    result
}

/// Lay one row out as parallel strips along the shorter side of `remaining`,
/// then cut the row's footprint off `remaining`.
fn place_row(
    areas: &[f64],
    indices: &[usize],
    row_sum: f64,
    last: bool,
    remaining: &mut Rect,
    out: &mut [Rect],
) {
    // A wide rectangle gets a column on its left edge, a tall one a row on top.
    let column = remaining.w >= remaining.h;
    let (side, extent) = if column {
        (remaining.h, remaining.w)
    } else {
        (remaining.w, remaining.h)
    };

    let mut thickness = if side > 0.0 { row_sum / side } else { 0.0 };
    // The last row owns whatever is left; earlier rows never overrun it.
    if row_sum > 0.0 && (last || thickness > extent) {
        thickness = extent;
    }

    tracing::trace!(
        items = areas.len(),
        row_sum,
        thickness,
        column,
        "Squarify: closing row"
    );

    let count = areas.len();
    let mut offset = 0.0;
    for (k, (&area, &index)) in areas.iter().zip(indices).enumerate() {
        let length = if k + 1 == count {
            (side - offset).max(0.0)
        } else if row_sum > 0.0 {
            side * area / row_sum
        } else {
            side / count as f64
        };

        out[index] = if column {
            Rect::new(remaining.x, remaining.y + offset, thickness, length)
        } else {
            Rect::new(remaining.x + offset, remaining.y, length, thickness)
        };
        offset += length;
    }

    if column {
        remaining.x += thickness;
        remaining.w = (remaining.w - thickness).max(0.0);
    } else {
        remaining.y += thickness;
        remaining.h = (remaining.h - thickness).max(0.0);
    }
}

/// Worst aspect ratio of `row` laid out along `side`, where `sum` is the row's total area.
/// `f64::MAX` for a degenerate row, infinite if the row holds a zero-area item.
pub fn worst_aspect_ratio(row: &[f64], sum: f64, side: f64) -> f64 {
    if row.is_empty() || sum <= 0.0 || side <= 0.0 {
        return f64::MAX;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    let max_r = row.iter().copied().fold(0.0, f64::max);
    let min_r = row.iter().copied().fold(f64::INFINITY, f64::min);
    let a = (side_sq * max_r) / sum_sq;
    let b = sum_sq / (side_sq * min_r);
    a.max(b)
}
