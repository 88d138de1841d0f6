use std::path::Path;

use astrostack_core::quality::QualityReport;
use astrostack_core::{StackOptions, StackResponse};
use console::Style;

const HISTOGRAM_BAR_WIDTH: usize = 40;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_stack_summary(options: &StackOptions, response: &StackResponse, output: &Path) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to(response.status_line()));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(24)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Mode"),
        s.method.apply_to(options.mode)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Alignment"),
        s.method.apply_to(options.alignment)
    );
    match options.active_kappa() {
        Some(kappa) => println!(
            "  {:<14}{}",
            s.label.apply_to("Sigma Clip"),
            s.value.apply_to(format!("\u{03ba} = {kappa}"))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Sigma Clip"),
            s.disabled.apply_to("disabled")
        ),
    }
    println!();

    println!("  {}", s.header.apply_to("Offsets"));
    for (i, offset) in response.offsets.iter().enumerate() {
        println!(
            "    {:<12}{}",
            s.label.apply_to(format!("Frame {}", i + 1)),
            s.value.apply_to(offset)
        );
    }
    println!();

    print_quality(&response.quality);
}

pub fn print_quality(report: &QualityReport) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Quality"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("SNR"),
        s.value.apply_to(format!("{:.2} dB", report.snr))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Sharpness"),
        s.value.apply_to(format!("{:.2}", report.sharpness))
    );
    println!();

    println!("  {}", s.header.apply_to("Luminance Histogram"));
    let peak = report.histogram.iter().cloned().fold(0.0f64, f64::max);
    let bucket_width = 256.0 / report.histogram.len().max(1) as f64;
    for (i, &fraction) in report.histogram.iter().enumerate() {
        let len = if peak > 0.0 {
            (fraction / peak * HISTOGRAM_BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        println!(
            "    {:>3}  {:<width$} {}",
            s.label.apply_to((i as f64 * bucket_width) as u32),
            s.method.apply_to("\u{2588}".repeat(len)),
            s.label.apply_to(format!("{:.3}", fraction)),
            width = HISTOGRAM_BAR_WIDTH
        );
    }
    println!();
}
