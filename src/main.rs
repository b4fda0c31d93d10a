use course_details::core::ConfigProvider;
use course_details::utils::{logger, validation::Validate};
use course_details::{
    CliConfig, CourseDetailAggregator, CoursePage, HttpCourseLookup, LoadState, OutputFormat,
    PageSettings, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::from_args();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting course-details CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let outcome = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => {
                    let currency_symbol = config.page.currency_symbol.clone();
                    load_page(config, &cli.course_id, currency_symbol).await
                }
                Err(e) => Err(e),
            }
        }
        None => {
            let currency_symbol = PageSettings::default().currency_symbol;
            load_page(cli.clone(), &cli.course_id, currency_symbol).await
        }
    };

    let (page, settings, exit_code) = match outcome {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(
                "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    };

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
        OutputFormat::Text => print_summary(&page, &settings),
    }

    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn load_page<C>(
    config: C,
    course_id: &str,
    currency_symbol: String,
) -> course_details::Result<(CoursePage, PageSettings, i32)>
where
    C: ConfigProvider + Validate,
{
    if let Err(e) = config.validate() {
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        return Err(e);
    }

    let settings = PageSettings {
        site_name: config.site_name().to_string(),
        currency_symbol,
    };

    let mut aggregator = CourseDetailAggregator::new(HttpCourseLookup::new(config)?);
    aggregator.load(course_id).await;

    let exit_code = match aggregator.state() {
        LoadState::Found(_) => 0,
        LoadState::NotFound => 4,
        LoadState::Failed(failure) => failure.severity.exit_code(),
        LoadState::Loading => 1,
    };
    let page = CoursePage::from_state(aggregator.state(), aggregator.selection(), &settings);
    Ok((page, settings, exit_code))
}

fn print_summary(page: &CoursePage, settings: &PageSettings) {
    println!("{}", page.document_title(settings));
    match page {
        CoursePage::Loading => println!("Loading..."),
        CoursePage::NotFound => println!("Course not found"),
        CoursePage::Error { message, retryable } => {
            println!("❌ {}", message);
            if *retryable {
                println!("💡 Try again in a moment");
            }
        }
        CoursePage::Course(view) => {
            println!("{} by {}", view.title, view.instructor_name);
            println!("Price: {}", view.price_label);
            println!("Rating: {} ({})", view.rating_label, view.review_count_label);
            println!(
                "{} videos • {} total length",
                view.chapter_count, view.total_runtime_label
            );
            for chapter in &view.chapters {
                println!(
                    "  {:>3}. {} [{}]",
                    chapter.index + 1,
                    chapter.title,
                    chapter.duration_label
                );
            }
            for review in &view.reviews {
                println!(
                    "  ★ {} • {} on {}: {}",
                    review.rating_label, review.author, review.reviewed_on, review.message
                );
            }
        }
    }
}
