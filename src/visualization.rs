use crate::coordinates::CoordinateSpace;
use crate::genetic_algorithm::Chromosome;
use crate::tour::Tour;
use plotters::prelude::*;
use std::error::Error;

/// Render a tour as a polyline over the city scatter and save it as a PNG.
pub fn visualize_tour(
    tour: &Tour,
    space: &CoordinateSpace,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    // Create a drawing area for the chart.
    let root = BitMapBackend::new(output_path, (1000, 1000)).into_drawing_area();
    root.fill(&WHITE)?;

    // Determine the coordinate range with a small margin around the cities.
    let (min_x, max_x) = bounds(space.points().iter().map(|p| p.x));
    let (min_y, max_y) = bounds(space.points().iter().map(|p| p.y));
    let pad_x = ((max_x - min_x) * 0.05).max(1.0);
    let pad_y = ((max_y - min_y) * 0.05).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Open tour, length {:.2}", tour.unfitness()),
            ("sans-serif", 30),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(min_x - pad_x..max_x + pad_x, min_y - pad_y..max_y + pad_y)?;

    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("y")
        .x_labels(10)
        .y_labels(10)
        .draw()?;

    // Draw the path in visiting order.
    chart.draw_series(LineSeries::new(
        tour.path().iter().map(|&city| {
            let p = space.point(city);
            (p.x, p.y)
        }),
        BLUE.stroke_width(2),
    ))?;

    // Draw each city as a labelled dot on top of the path.
    chart.draw_series(space.points().iter().enumerate().map(|(i, p)| {
        EmptyElement::at((p.x, p.y))
            + Circle::new((0, 0), 4, RED.filled())
            + Text::new(format!("{}", i), (6, -6), ("sans-serif", 14).into_font())
    }))?;

    // Save the result to the specified output path.
    root.present()?;
    println!("Chart saved to {}", output_path);
    Ok(())
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    })
}
