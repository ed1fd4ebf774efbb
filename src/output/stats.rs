//! Statistics reporting.

use console::style;

use crate::download::RunStats;

/// Print statistics for a finished run.
pub fn print_run_stats(stats: &RunStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!(
        "{}",
        style(format!("Statistics for {}:", stats.profile)).bold()
    );
    println!("  Extra pages:  {}", stats.pages_fetched);
    println!("  Posts found:  {}", stats.links_found);
    println!("  Posts read:   {}", stats.posts_visited);
    if stats.posts_failed > 0 {
        println!("  Posts failed: {}", style(stats.posts_failed).red());
    }
    println!("  Media found:  {}", stats.media_found);
    println!("  Pictures:     {}", style(stats.pic_count).green());
    println!("  Videos:       {}", style(stats.vid_count).green());
    if stats.failed_downloads > 0 {
        println!("  Failed:       {}", style(stats.failed_downloads).yellow());
    }
    println!("  Total:        {} downloaded", stats.total_downloaded());
    println!("{}", style("═".repeat(50)).dim());
}
