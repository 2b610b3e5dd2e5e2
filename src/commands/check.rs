//! Validate content files

use anyhow::Result;
use notify_debouncer_mini::new_debouncer;
use notify_debouncer_mini::notify::RecursiveMode;
use std::time::Duration;

use crate::Blog;

/// Outcome of one validation pass
#[derive(Debug, Default)]
pub struct CheckSummary {
    pub posts: usize,
    pub authors: usize,
    /// Human-readable problems, one per skipped file or dangling reference
    pub problems: Vec<String>,
}

/// Load everything once and collect what a listing would silently skip
pub fn check(blog: &Blog) -> CheckSummary {
    let posts = blog.loader().load_posts_report();
    let authors = blog.loader().load_authors_report();

    let mut problems: Vec<String> = posts
        .skipped
        .iter()
        .chain(authors.skipped.iter())
        .map(|e| e.to_string())
        .collect();

    for post in &posts.items {
        if post.title().trim().is_empty() {
            problems.push(format!("{:?}: missing title", post.source));
        }
        if let Some(date) = &post.front_matter.date {
            if post.date().is_none() {
                problems.push(format!("{:?}: unreadable date '{}'", post.source, date));
            }
        }
    }

    CheckSummary {
        posts: posts.items.len(),
        authors: authors.items.len(),
        problems,
    }
}

/// Validate once; fails when any problem was found
pub fn run(blog: &Blog) -> Result<()> {
    let summary = check(blog);
    print_summary(&summary);

    if !summary.problems.is_empty() {
        anyhow::bail!("{} problem(s) found", summary.problems.len());
    }
    Ok(())
}

/// Re-validate whenever a content file changes
pub async fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Debounce editor save bursts
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for dir in [&blog.posts_dir, &blog.authors_dir] {
        if dir.exists() {
            debouncer.watcher().watch(dir, RecursiveMode::NonRecursive)?;
            tracing::debug!("Watching: {:?}", dir);
        } else {
            tracing::warn!("Not watching missing directory {:?}", dir);
        }
    }

    print_summary(&check(blog));
    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        let path = e.path.to_string_lossy();
                        !path.ends_with('~') && !path.contains(".DS_Store")
                    })
                    .collect();

                if relevant.is_empty() {
                    continue;
                }

                for event in &relevant {
                    tracing::info!("File changed: {}", event.path.display());
                }
                print_summary(&check(blog));
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &CheckSummary) {
    println!(
        "Checked {} posts and {} authors",
        summary.posts, summary.authors
    );
    for problem in &summary.problems {
        println!("  ! {}", problem);
    }
    if summary.problems.is_empty() {
        println!("  No problems found.");
    }
}
