//! Seed the data directory with starter content.
//!
//! Opens both collection documents the same way the server does and, when
//! they are empty (or `--force` is given), fills them with a small set of
//! example entities so the site renders something on first boot.
//!
//! # Environment Variables
//!
//! - `ATELIER_DATA_DIR` - Data directory, when not passed via `-d`

use std::path::Path;

use tracing::info;

use atelier_server::db::{
    DocumentStore, ProjectRepository, RepositoryError, TestimonialRepository,
};
use atelier_server::models::{
    NewProject, NewTestimonial, ProjectsDocument, TestimonialsDocument,
};

/// Seed both collections under `data_dir`.
///
/// # Errors
///
/// Returns an error if a document cannot be opened or written.
pub async fn run(data_dir: Option<&str>, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let data_dir = data_dir
        .map(String::from)
        .or_else(|| std::env::var("ATELIER_DATA_DIR").ok())
        .unwrap_or_else(|| "data".to_string());
    let data_dir = Path::new(&data_dir);

    info!("Seeding data directory: {}", data_dir.display());

    seed_projects(data_dir, force).await?;
    seed_testimonials(data_dir, force).await?;

    info!("Seeding complete");
    Ok(())
}

async fn seed_projects(data_dir: &Path, force: bool) -> Result<(), RepositoryError> {
    let store = DocumentStore::open(data_dir, "projects", ProjectsDocument::default()).await?;

    if !force && !store.read().await.projects.is_empty() {
        info!("projects.json already has content, skipping (use --force to overwrite)");
        return Ok(());
    }

    if force {
        store
            .write(|doc: &mut ProjectsDocument| {
                doc.projects.clear();
                Ok::<_, RepositoryError>(())
            })
            .await?;
    }

    let repo = ProjectRepository::new(&store);
    for new in starter_projects() {
        let project = repo.create(new).await?;
        info!("Seeded project {}: {}", project.id, project.title);
    }

    Ok(())
}

async fn seed_testimonials(data_dir: &Path, force: bool) -> Result<(), RepositoryError> {
    let store =
        DocumentStore::open(data_dir, "testimonials", TestimonialsDocument::default()).await?;

    if !force && !store.read().await.testimonials.is_empty() {
        info!("testimonials.json already has content, skipping (use --force to overwrite)");
        return Ok(());
    }

    if force {
        store
            .write(|doc: &mut TestimonialsDocument| {
                doc.testimonials.clear();
                Ok::<_, RepositoryError>(())
            })
            .await?;
    }

    let repo = TestimonialRepository::new(&store);
    for new in starter_testimonials() {
        let testimonial = repo.create(new).await?;
        info!("Seeded testimonial {}: {}", testimonial.id, testimonial.author);
    }

    Ok(())
}

fn starter_projects() -> Vec<NewProject> {
    vec![
        NewProject {
            title: "Atelier".to_string(),
            description: "This site: a portfolio backend with file-backed storage.".to_string(),
            tags: vec!["rust".to_string(), "axum".to_string()],
            image: Some("/images/atelier.png".to_string()),
            demo_url: None,
            repo_url: Some("https://github.com/PistachioHQ/atelier".to_string()),
            featured: true,
        },
        NewProject {
            title: "Sample Project".to_string(),
            description: "Replace me through the admin API.".to_string(),
            tags: vec![],
            image: None,
            demo_url: None,
            repo_url: None,
            featured: false,
        },
    ]
}

fn starter_testimonials() -> Vec<NewTestimonial> {
    vec![NewTestimonial {
        author: "A Happy Client".to_string(),
        quote: "Delivered exactly what we needed, ahead of schedule.".to_string(),
        role: Some("Founder, Example Co".to_string()),
        avatar: None,
    }]
}
