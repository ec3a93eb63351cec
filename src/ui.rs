use console::style;
use docubleach::{HyperlinkRecord, SanitizeResult};
use std::path::Path;

pub fn render_removal(result: &SanitizeResult) {
    if result.macros_found {
        println!("\n{}", style("┌─ Macros Detectadas y Eliminadas ─").green());
        println!(
            "{}",
            style(format!("│ Archivo: {}", result.path.display()))
                .green()
                .bold()
        );
        for entry in &result.removed {
            println!("{}", style(format!("│   • {}", entry)).green());
        }
        println!("{}", style("└─").green());
    } else {
        println!("\n{}", style("┌─ No se detectaron macros ─").yellow());
        println!(
            "{}",
            style(format!("│ Archivo: {}", result.path.display()))
                .yellow()
                .bold()
        );
        println!(
            "{}",
            style("│ El contenido permanece sin cambios.").yellow()
        );
        println!("{}", style("└─").yellow());
    }
}

pub fn render_detection(path: &Path, macros_present: bool) {
    let (title, color_line) = if macros_present {
        ("Contiene macros", style(format!("│ {}", path.display())).red())
    } else {
        ("Sin macros", style(format!("│ {}", path.display())).green())
    };
    println!("\n{}", style(format!("┌─ {} ─", title)).cyan());
    println!("{}", color_line);
    println!("{}", style("└─").cyan());
}

pub fn render_hyperlinks(path: &Path, links: &[HyperlinkRecord]) {
    println!(
        "\n{}",
        style(format!("┌─ Hipervínculos externos · {} ─", path.display())).cyan()
    );
    if links.is_empty() {
        println!("{}", style("│ No se encontraron hipervínculos externos.").dim());
    }
    for link in links {
        println!("{}", style(format!("│   • {}", link.target)).cyan());
    }
    println!("{}", style("└─").cyan());
}

pub fn render_failure(path: &Path, error: &str) {
    eprintln!(
        "\n{}",
        style(format!("│ Error en {}: {}", path.display(), error)).red()
    );
}

pub fn render_size_limit(limit: u64) {
    println!(
        "{}",
        style(format!("│ Límite de tamaño por archivo: {}", format_size(limit))).dim()
    );
}

pub fn render_summary(successes: usize, failures: usize) {
    let line = format!("│ Procesados: {} · Fallidos: {}", successes, failures);
    if failures == 0 {
        println!("\n{}", style(line).dim());
    } else {
        println!("\n{}", style(line).red());
    }
}

/// Tamaño legible en unidades binarias, con el valor exacto entre paréntesis.
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} bytes");
    }

    let mut scaled = bytes as f64 / 1024.0;
    let mut unit = 0;
    while scaled >= 1024.0 && unit + 1 < UNITS.len() {
        scaled /= 1024.0;
        unit += 1;
    }
    format!("{scaled:.2} {} ({bytes} bytes)", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::format_size;

    #[test]
    fn size_limit_is_shown_in_mebibytes() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(209_715_200), "200.00 MiB (209715200 bytes)");
    }
}
