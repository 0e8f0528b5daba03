//! Built-in catalog content.

use chrono::{DateTime, Utc};

use super::error::RecordError;
use super::model::{AppRecord, PortfolioItemRecord, Pricing};

fn strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

pub fn portfolio_items(created_at: DateTime<Utc>) -> Vec<PortfolioItemRecord> {
  let item = |id, title: &str, description: &str, category: &str, image: &str, tech: &[&str]| {
    PortfolioItemRecord {
      id,
      title: title.to_string(),
      description: description.to_string(),
      category: category.to_string(),
      image_url: format!(
        "https://images.unsplash.com/{}?auto=format&fit=crop&w=1400&h=900",
        image
      ),
      technologies: strings(tech),
      project_url: "#".to_string(),
      created_at: Some(created_at),
    }
  };

  vec![
    item(
      1,
      "E-Commerce Platform Redesign",
      "Complete redesign and development of a modern e-commerce platform with enhanced user experience.",
      "Web Development",
      "photo-1517694712202-14dd9538aa97",
      &["React", "Node.js"],
    ),
    item(
      2,
      "Health & Fitness Tracker",
      "A comprehensive health and fitness mobile application with personalized workout plans.",
      "Mobile App",
      "photo-1516116216624-53e697fedbea",
      &["Swift", "Flutter"],
    ),
    item(
      3,
      "Analytics Dashboard",
      "Interactive data visualization dashboard designed for enterprise-level data analysis.",
      "UI/UX Design",
      "photo-1555774698-0b77e0d5fac6",
      &["Figma", "D3.js"],
    ),
    item(
      4,
      "Corporate Brand Identity",
      "Complete brand identity design including logo, style guide, and marketing materials.",
      "Branding",
      "photo-1532622785990-d2c36a76f5a6",
      &["Illustrator", "Photoshop"],
    ),
  ]
}

struct AppSeed {
  id: u32,
  name: &'static str,
  category: &'static str,
  price: Option<&'static str>,
  description: &'static str,
  rating: f32,
  reviews: u32,
  image_url: &'static str,
  screenshot: &'static str,
  features: [&'static str; 6],
  developer: &'static str,
  release_date: &'static str,
  version: &'static str,
  size: &'static str,
  slug: &'static str,
}

impl AppSeed {
  fn into_record(self, created_at: DateTime<Utc>) -> Result<AppRecord, RecordError> {
    let pricing = match self.price {
      Some(amount) => Pricing::paid(amount)?,
      None => Pricing::Free,
    };
    Ok(AppRecord {
      id: self.id,
      name: self.name.to_string(),
      category: self.category.to_string(),
      pricing,
      description: self.description.to_string(),
      rating: self.rating,
      reviews: self.reviews,
      image_url: self.image_url.to_string(),
      features: Some(strings(&self.features)),
      screenshots: Some(strings(&[self.image_url, self.screenshot])),
      developer: Some(self.developer.to_string()),
      release_date: Some(self.release_date.to_string()),
      version: Some(self.version.to_string()),
      size: Some(self.size.to_string()),
      website: Some(format!("https://example.com/{}", self.slug)),
      created_at: Some(created_at),
    })
  }
}

pub fn apps(created_at: DateTime<Utc>) -> Result<Vec<AppRecord>, RecordError> {
  let seeds = [
    AppSeed {
      id: 1,
      name: "TaskMaster Pro",
      category: "Productivity",
      price: Some("4.99"),
      description: "The ultimate task management app that helps you organize your work and life.",
      rating: 4.8,
      reviews: 2300,
      image_url: "https://images.unsplash.com/photo-1607252650355-f7fd0460ccdb?auto=format&fit=crop&w=800&h=450",
      screenshot: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?auto=format&fit=crop&w=800&h=450",
      features: [
        "Create and organize tasks with categories",
        "Set reminders and deadlines",
        "Track your productivity with analytics",
        "Sync across all your devices",
        "Collaborate with team members",
        "Dark mode support",
      ],
      developer: "Polifilo Software Inc.",
      release_date: "June 15, 2023",
      version: "2.1.3",
      size: "45 MB",
      slug: "taskmaster",
    },
    AppSeed {
      id: 2,
      name: "FitTrack",
      category: "Health & Fitness",
      price: None,
      description: "Track your workouts, monitor progress, and achieve your fitness goals.",
      rating: 4.6,
      reviews: 1500,
      image_url: "https://cdn.pixabay.com/photo/2020/04/02/22/09/fitness-4996855_1280.jpg",
      screenshot: "https://cdn.pixabay.com/photo/2017/01/09/11/30/dumbbell-1966247_1280.jpg",
      features: [
        "Track over 100 different exercises",
        "Create custom workout routines",
        "Monitor calories burned",
        "Connect with fitness trackers",
        "Progress charts and analytics",
        "Community challenges",
      ],
      developer: "HealthTech Solutions",
      release_date: "March 3, 2023",
      version: "3.0.5",
      size: "67 MB",
      slug: "fittrack",
    },
    AppSeed {
      id: 3,
      name: "StreamHub",
      category: "Entertainment",
      price: Some("3.99"),
      description: "Stream your favorite content with personalized recommendations.",
      rating: 4.7,
      reviews: 3200,
      image_url: "https://images.unsplash.com/photo-1493711662062-fa541adb3fc8?auto=format&fit=crop&w=800&h=450",
      screenshot: "https://images.unsplash.com/photo-1522869635100-9f4c5e86aa37?auto=format&fit=crop&w=800&h=450",
      features: [
        "Access to thousands of movies and shows",
        "Create personalized playlists",
        "Download content for offline viewing",
        "Family sharing across 5 accounts",
        "4K Ultra HD streaming",
        "Ad-free experience",
      ],
      developer: "MediaStream Technologies",
      release_date: "January 12, 2023",
      version: "4.2.1",
      size: "85 MB",
      slug: "streamhub",
    },
    AppSeed {
      id: 4,
      name: "MindfulMe",
      category: "Lifestyle",
      price: None,
      description: "Guided meditation and mindfulness exercises for daily peace.",
      rating: 4.9,
      reviews: 4700,
      image_url: "https://images.unsplash.com/photo-1518640467707-6811f4a6ab73?auto=format&fit=crop&w=800&h=450",
      screenshot: "https://images.unsplash.com/photo-1506126613408-eca07ce68773?auto=format&fit=crop&w=800&h=450",
      features: [
        "Over 200 guided meditations",
        "Sleep stories and calming sounds",
        "Breathing exercises",
        "Mood tracking",
        "Daily mindfulness reminders",
        "Progress tracking",
      ],
      developer: "Zen Digital LLC",
      release_date: "April 22, 2023",
      version: "2.4.0",
      size: "32 MB",
      slug: "mindfulme",
    },
    AppSeed {
      id: 5,
      name: "NotePro",
      category: "Productivity",
      price: Some("2.99"),
      description: "Smart note-taking app with organization features and cloud sync.",
      rating: 4.5,
      reviews: 2800,
      image_url: "https://images.unsplash.com/photo-1512758017271-d7b84c2113f1?auto=format&fit=crop&w=800&h=450",
      screenshot: "https://images.unsplash.com/photo-1494178270175-e96de6971df1?auto=format&fit=crop&w=800&h=450",
      features: [
        "Create rich text notes with formatting",
        "Organize with tags and folders",
        "Cloud sync across devices",
        "Voice-to-text transcription",
        "Embed images and documents",
        "Powerful search functionality",
      ],
      developer: "Productivity Works",
      release_date: "February 8, 2023",
      version: "3.1.2",
      size: "28 MB",
      slug: "notepro",
    },
    AppSeed {
      id: 6,
      name: "DreamTrack",
      category: "Health & Fitness",
      price: Some("1.99"),
      description: "Sleep tracker with insights to improve your sleep quality and habits.",
      rating: 4.4,
      reviews: 1900,
      image_url: "https://cdn.pixabay.com/photo/2021/11/11/14/19/woman-6786626_1280.jpg",
      screenshot: "https://cdn.pixabay.com/photo/2019/11/10/17/36/moon-4616333_1280.jpg",
      features: [
        "Track sleep patterns and quality",
        "Smart alarm for optimal wake times",
        "Soothing sleep sounds library",
        "Weekly sleep reports and trends",
        "Sleep goal setting",
        "Integration with health apps",
      ],
      developer: "SleepWell Technologies",
      release_date: "May 17, 2023",
      version: "1.8.4",
      size: "38 MB",
      slug: "dreamtrack",
    },
  ];

  seeds
    .into_iter()
    .map(|seed| seed.into_record(created_at))
    .collect()
}
