//! Static topic, course and career-goal catalogs.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::module::DifficultyTier;
use crate::simulate::{simulate, Pending};

/// A searchable learning topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub difficulty: DifficultyTier,
}

impl Topic {
    /// Case-insensitive substring match on title or category.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.category.to_lowercase().contains(&query)
    }
}

/// Career goal chosen during onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct TopicCatalog {
    topics: Vec<Topic>,
}

impl TopicCatalog {
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    pub fn builtin() -> Self {
        let topic = |id, title: &str, category: &str, difficulty| Topic {
            id,
            title: title.into(),
            category: category.into(),
            difficulty,
        };
        Self::new(vec![
            topic(1, "Machine Learning", "AI/ML", DifficultyTier::Intermediate),
            topic(2, "React Hooks", "Frontend", DifficultyTier::Beginner),
            topic(3, "Node.js APIs", "Backend", DifficultyTier::Intermediate),
            topic(4, "Docker Containers", "DevOps", DifficultyTier::Advanced),
            topic(5, "Python Basics", "Programming", DifficultyTier::Beginner),
            topic(6, "Data Structures", "Computer Science", DifficultyTier::Intermediate),
        ])
    }

    /// Topics whose title or category contains `query`. A blank query finds nothing.
    pub fn search(&self, query: &str) -> Vec<Topic> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        self.topics.iter().filter(|t| t.matches(query)).cloned().collect()
    }

    /// [`search`](Self::search) behind the simulated search latency.
    pub fn search_delayed(&self, query: &str, delay: Duration) -> Pending<Vec<Topic>> {
        let catalog = self.clone();
        let query = query.to_string();
        simulate(delay, move || catalog.search(&query))
    }

    pub fn get(&self, id: u32) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A third-party course listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: u32,
    pub title: String,
    pub instructor: String,
    pub rating: f32,
    pub students: u32,
    /// Human-readable length, e.g. "44 hours".
    pub duration: String,
    pub level: DifficultyTier,
    pub price: f64,
    pub category: String,
    pub skills: Vec<String>,
}

/// Category name that selects every course.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

impl CourseCatalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    pub fn builtin() -> Self {
        #[allow(clippy::too_many_arguments)]
        fn course(
            id: u32,
            title: &str,
            instructor: &str,
            rating: f32,
            students: u32,
            hours: u32,
            level: DifficultyTier,
            price: f64,
            category: &str,
            skills: &[&str],
        ) -> Course {
            Course {
                id,
                title: title.into(),
                instructor: instructor.into(),
                rating,
                students,
                duration: format!("{hours} hours"),
                level,
                price,
                category: category.into(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
            }
        }
        use DifficultyTier::{Advanced, Beginner, Intermediate};
        Self::new(vec![
            course(
                1,
                "Complete Web Development Bootcamp",
                "Dr. Angela Yu",
                4.7,
                850_000,
                65,
                Beginner,
                84.99,
                "Web Development",
                &["HTML", "CSS", "JavaScript", "Node.js", "React", "MongoDB"],
            ),
            course(
                2,
                "Machine Learning A-Z",
                "Kirill Eremenko",
                4.5,
                500_000,
                44,
                Intermediate,
                94.99,
                "Data Science",
                &["Python", "R", "Machine Learning", "Data Science"],
            ),
            course(
                3,
                "React - The Complete Guide",
                "Maximilian Schwarzmüller",
                4.6,
                400_000,
                48,
                Intermediate,
                89.99,
                "Web Development",
                &["React", "Redux", "JavaScript", "Hooks"],
            ),
            course(
                4,
                "Python for Data Science",
                "Jose Portilla",
                4.6,
                300_000,
                25,
                Beginner,
                79.99,
                "Data Science",
                &["Python", "Pandas", "NumPy", "Matplotlib"],
            ),
            course(
                5,
                "AWS Certified Solutions Architect",
                "Stephane Maarek",
                4.7,
                600_000,
                27,
                Advanced,
                99.99,
                "DevOps",
                &["AWS", "Cloud Computing", "Architecture"],
            ),
            course(
                6,
                "Docker & Kubernetes Complete Guide",
                "Stephen Grider",
                4.6,
                200_000,
                22,
                Advanced,
                89.99,
                "DevOps",
                &["Docker", "Kubernetes", "DevOps"],
            ),
        ])
    }

    /// Courses in `category` (exact name), or every course for [`ALL_CATEGORIES`].
    pub fn in_category(&self, category: &str) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|c| category == ALL_CATEGORIES || c.category == category)
            .collect()
    }

    pub fn get(&self, id: u32) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Goals offered by onboarding.
pub fn builtin_goals() -> Vec<Goal> {
    [
        ("frontend", "Frontend Developer"),
        ("backend", "Backend Developer"),
        ("fullstack", "Full Stack Developer"),
        ("designer", "UI/UX Designer"),
    ]
    .into_iter()
    .map(|(id, title)| Goal {
        id: id.into(),
        title: title.into(),
    })
    .collect()
}

/// Look up a goal by id.
pub fn find_goal(id: &str) -> Option<Goal> {
    builtin_goals().into_iter().find(|g| g.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_matches_title_and_category_case_insensitively() {
        let catalog = TopicCatalog::builtin();

        let by_title: Vec<_> = catalog.search("react").into_iter().map(|t| t.id).collect();
        assert_eq!(by_title, vec![2]);

        let by_category: Vec<_> = catalog.search("BACKEND").into_iter().map(|t| t.id).collect();
        assert_eq!(by_category, vec![3]);

        let shared: Vec<_> = catalog.search("data").into_iter().map(|t| t.id).collect();
        assert_eq!(shared, vec![6]);
    }

    #[test]
    fn test_blank_query_finds_nothing() {
        let catalog = TopicCatalog::builtin();
        assert!(catalog.search("").is_empty());
        assert!(catalog.search("   ").is_empty());
    }

    #[test]
    fn test_courses_by_category() {
        let catalog = CourseCatalog::builtin();
        assert_eq!(catalog.in_category(ALL_CATEGORIES).len(), 6);

        let devops: Vec<_> = catalog.in_category("DevOps").iter().map(|c| c.id).collect();
        assert_eq!(devops, vec![5, 6]);

        assert!(catalog.in_category("Design").is_empty());
        assert!(catalog.in_category("devops").is_empty());
    }

    #[test]
    fn test_find_goal() {
        assert_eq!(find_goal("backend").unwrap().title, "Backend Developer");
        assert!(find_goal("astronaut").is_none());
    }

    #[tokio::test]
    async fn test_search_delayed_yields_once() {
        let catalog = TopicCatalog::builtin();
        let results = catalog
            .search_delayed("python", Duration::ZERO)
            .wait()
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Python Basics");
    }
}
