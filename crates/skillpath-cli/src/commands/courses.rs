use clap::Subcommand;

use skillpath_core::catalog::ALL_CATEGORIES;
use skillpath_core::CourseCatalog;

#[derive(Subcommand)]
pub enum CoursesAction {
    /// List courses, optionally limited to one category
    List {
        /// Category name, e.g. "Data Science"
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: CoursesAction) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = CourseCatalog::builtin();
    match action {
        CoursesAction::List { category, json } => {
            let courses = catalog.in_category(&category);
            if json {
                super::print_json(&courses)?;
                return Ok(());
            }
            for course in courses {
                println!(
                    "{:>2}  {:<40} {:<12} {:>5.1}  ${:.2}",
                    course.id,
                    course.title,
                    course.level.label(),
                    course.rating,
                    course.price
                );
            }
        }
    }
    Ok(())
}
