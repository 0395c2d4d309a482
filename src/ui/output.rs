//! Console reporting for an export run.

use crate::database::NeoDatabase;
use std::path::Path;

/// Prints what was loaded from the two data files.
///
/// # Arguments
/// * `db` - Linked database built from the data files
pub fn print_load_summary(db: &NeoDatabase) {
    let hazardous = db.neos().iter().filter(|neo| neo.hazardous).count();
    println!(
        "🔄 Data files processed successfully!\n\t🔎 Found {} near-Earth objects ({} potentially hazardous)",
        db.neos().len(),
        hazardous
    );
    println!("\t🔎 Found {} close approaches", db.approaches().len());
}

/// Prints the outcome of the export.
///
/// # Arguments
/// * `count` - Number of close approaches written
/// * `outfile` - File the close approaches were written to
pub fn print_export_report(count: usize, outfile: &Path) {
    println!("\n🔚 Export completed!");
    if count == 0 {
        println!(
            "⚠️  No close approaches to write, '{}' only holds the empty layout",
            outfile.display()
        );
    } else {
        println!("✅ Wrote {} close approaches to '{}'", count, outfile.display());
    }
}
