use std::path::Path;

use indexmap::IndexMap;
use plotters::prelude::*;

use migration_analysis::placement::PlacementSummary;
use migration_analysis::power::PowerSummary;

/// One bar per strategy with its total energy consumption.
pub(crate) fn plot_total_energy(results: &IndexMap<String, PowerSummary>, path: &Path) {
    let labels: Vec<String> = results.keys().cloned().collect();
    let values: Vec<f64> = results
        .values()
        .map(|summary| summary.total_energy_consumption)
        .collect();
    draw_bars(
        path,
        "Total Energy Consumption by Migration Strategy",
        "Migration Strategy",
        "Total Energy Consumption (Wh)",
        &labels,
        &values,
    );
}

/// One bar per host with its VM count, busiest hosts first.
pub(crate) fn plot_vm_distribution(strategy: &str, summary: &PlacementSummary, path: &Path) {
    let mut entries: Vec<(&String, &usize)> = summary.vms_per_host.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    let labels: Vec<String> = entries.iter().map(|(host, _)| (*host).clone()).collect();
    let values: Vec<f64> = entries.iter().map(|(_, count)| **count as f64).collect();
    draw_bars(
        path,
        &format!("VM Distribution Across Hosts ({})", strategy),
        "Host ID",
        "Number of VMs",
        &labels,
        &values,
    );
}

fn bar_styles(count: usize) -> Vec<ShapeStyle> {
    let side = (count as f64).cbrt().ceil() as usize;
    let step = 200 / side.max(1);
    let mut styles = Vec::with_capacity(count);
    for i in 0..count {
        let r = ((i % side) * step + 20) as u8;
        let tmp = i / side;
        let g = ((tmp % side) * step + 20) as u8;
        let b = ((tmp / side) * step + 20) as u8;
        styles.push(Into::<ShapeStyle>::into(RGBColor(r, g, b)).filled());
    }
    styles
}

fn draw_bars(path: &Path, title: &str, x_desc: &str, y_desc: &str, labels: &[String], values: &[f64]) {
    let styles = bar_styles(labels.len());
    let root_area = BitMapBackend::new(path, (1200, 675)).into_drawing_area();
    root_area.fill(&WHITE).unwrap();
    let max = values.iter().fold(0., |acc: f64, v| acc.max(*v)) * 1.1;
    let max = if max > 0. { max } else { 1. };
    let mut ctx = ChartBuilder::on(&root_area)
        .caption(title, ("sans-serif", 28))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d((0..labels.len() as i32).into_segmented(), 0.0..max)
        .unwrap();
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|coord| match coord {
            SegmentValue::CenterOf(idx) => labels
                .get(*idx as usize)
                .cloned()
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()
        .unwrap();
    ctx.draw_series(values.iter().enumerate().map(|(i, value)| {
        let i = i as i32;
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *value)],
            styles[i as usize],
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))
    .unwrap();
    root_area.present().unwrap();
}
