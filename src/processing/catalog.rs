//! Read-only skill catalog shared by every extraction request

use crate::error::{RecommenderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Index of a term inside its [`SkillCatalog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkillId(usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTerm {
    pub canonical: String,
    pub lowered: String,
}

/// Immutable skill catalog. Built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    terms: Vec<SkillTerm>,
    index: HashMap<String, SkillId>,
    keywords: Vec<String>,
    stop_words: HashSet<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    skills: Vec<String>,
    #[serde(default)]
    keywords: Vec<String>,
}

impl SkillCatalog {
    /// Build a catalog from canonical skill names and a supplementary keyword
    /// list. An entry that repeats an earlier one (ignoring case) keeps the
    /// earlier position but replaces its canonical spelling.
    pub fn new<S, K>(skills: S, keywords: K) -> Result<Self>
    where
        S: IntoIterator,
        S::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        let mut terms: Vec<SkillTerm> = Vec::new();
        let mut index = HashMap::new();

        for skill in skills {
            let canonical: String = skill.into().trim().to_string();
            if canonical.is_empty() {
                continue;
            }
            let lowered = canonical.to_lowercase();
            if let Some(&SkillId(existing)) = index.get(&lowered) {
                terms[existing].canonical = canonical;
                continue;
            }
            index.insert(lowered.clone(), SkillId(terms.len()));
            terms.push(SkillTerm { canonical, lowered });
        }

        if terms.is_empty() {
            return Err(RecommenderError::Catalog(
                "Skill catalog must contain at least one skill".to_string(),
            ));
        }

        let mut keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.into().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        let mut seen = HashSet::new();
        keywords.retain(|k| seen.insert(k.clone()));

        let stop_words = STOP_WORDS.iter().map(|s| s.to_string()).collect();

        Ok(Self {
            terms,
            index,
            keywords,
            stop_words,
        })
    }

    /// The built-in catalog of technical and design skills
    pub fn builtin() -> Self {
        let skills = BASE_SKILLS.iter().chain(ADDITIONAL_SKILLS.iter()).copied();
        Self::new(skills, TECH_KEYWORDS.iter().copied())
            .expect("Built-in skill catalog is not empty")
    }

    /// Load a substitute catalog from TOML: `skills = [...]`, `keywords = [...]`
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| RecommenderError::Catalog(format!("Failed to parse skill catalog: {}", e)))?;
        Self::new(file.skills, file.keywords)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        log::info!("Loaded {} skills from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = (SkillId, &SkillTerm)> {
        self.terms.iter().enumerate().map(|(i, term)| (SkillId(i), term))
    }

    pub fn term(&self, id: SkillId) -> &SkillTerm {
        &self.terms[id.0]
    }

    pub fn canonical(&self, id: SkillId) -> &str {
        &self.terms[id.0].canonical
    }

    /// Exact lookup by lowercase form
    pub fn lookup(&self, lowered: &str) -> Option<SkillId> {
        self.index.get(lowered).copied()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// English stop words
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Supplementary keywords matched with spelling variants
const TECH_KEYWORDS: &[&str] = &[
    "python", "java", "javascript", "c++", "c#", "ruby", "php", "swift", "kotlin", "typescript",
    "html", "css", "sql", "nosql", "mongodb", "postgresql", "mysql", "oracle", "redis",
    "react", "angular", "vue", "node", "express", "django", "flask", "spring", "hibernate",
    "aws", "azure", "gcp", "google cloud", "docker", "kubernetes", "jenkins", "terraform",
    "git", "github", "gitlab", "bitbucket", "jira", "confluence", "agile", "scrum", "kanban",
    "linux", "unix", "windows", "macos", "android", "ios", "rest", "graphql", "api",
    "machine learning", "deep learning", "ai", "artificial intelligence", "data science",
    "hadoop", "spark", "tableau", "power bi", "excel", "word", "powerpoint", "photoshop",
    "illustrator", "sketch", "figma", "ui", "ux", "seo", "automation", "testing",
];

const BASE_SKILLS: &[&str] = &[
    "3D Design", "3D Graphics", "3D Mathematics", "3D Modeling", "3D Modeling Tools",
    "3D Programming", "Adobe Creative Suite", "Agile Methodology", "Ai", "Ajax", "Algorithms",
    "Animation", "Animation Software", "Apis", "App Distribution Process",
    "Application Frameworks", "Ar Toolkits", "Assembly Language", "Audio Editing Software",
    "Auditory Aesthetics", "Back-End Programming", "Big Data", "Blockchain Technology",
    "Branding", "Bus Communications", "Business Acumen", "C", "C#", "C++", "Cad", "Ci/Cd",
    "Cloud Platforms", "Cloud Security", "Code Efficiency", "Color Theory", "Command Line",
    "Consensus Methods", "Consistency", "Containerization", "Content Organization",
    "Content Strategy", "Copywriting", "Cross-Browser Compatibility",
    "Cross-Functional Collaboration", "Cryptography", "Css", "Css Pre-Processors",
    "Customer Journey Mapping", "Cyber Security", "Data Analysis", "Data Backup And Recovery",
    "Data Modeling", "Data Science", "Data Structures", "Data Visualization", "Data Warehousing",
    "Database Design Principles", "Database Management", "Database Performance",
    "Database Security Principles", "Database Structures", "Database Systems", "Databases",
    "Debugging", "Deep Learning", "Design Systems", "Devops Practices", "Distributed Computing",
    "Embedded C/C++", "Embedded Systems", "Emerging Technology Familiarity", "Ergonomic Design",
    "Etl Processes", "Front-End Frameworks", "Game Design Principles",
    "Game Distribution Platforms", "Game Mechanics", "Game Physics",
    "Game Testing And Debugging", "Git", "Go", "Graphic Design", "Graphics Programming",
    "Hardware Architecture", "Hardware Tools", "High-Performance Computing", "Html",
    "Incident Management", "Incident Response", "Infrastructure As Code (Iac)", "Java",
    "Javascript", "Javascript Frameworks", "Jquery", "Kotlin", "Lighting", "Machine Learning",
    "Market Research", "Material Knowledge", "Mathematics", "Microcontroller Programming",
    "Mobile App Lifecycle", "Mobile App Security", "Mobile Sdks", "Mobile Ui/Ux", "Mongodb",
    "Monitoring And Alerting Tools", "Multiplayer Network Programming", "Multithreading",
    "Network Configuration", "Network Programming", "Networking", "Node.Js", "Nosql Databases",
    "Operating Systems", "Orchestration", "P2P Networks", "Package Managers", "Print Design",
    "Product Design", "Prototyping", "Prototyping Tools", "Python", "R", "React Native",
    "Reactjs", "Real-Time Operating Systems", "Recording Equipment", "Responsive Design",
    "Restful Apis", "Rtos", "Ruby", "Schema Design", "Seo Basics", "Server Architecture",
    "Server-Side Frameworks", "Serverless Architecture", "Service Design",
    "Smart Contract Development", "Software Proficiency", "Software Testing", "Solidity",
    "Sound Design", "Spatial Audio", "Spatial Design", "Spatial Understanding", "Sql",
    "Statistical Analysis", "Storyboarding", "Storytelling", "Surveys", "Swift",
    "System Administration", "System Architecture", "Taxonomy Development", "Testing And Qa",
    "Texture Mapping", "Timing", "Typography", "Unity & Unreal Engine",
    "Unix/Linux Environments", "Usability Testing", "User Empathy", "User Experience Design",
    "User Interface Design", "User Interviews", "User Personas", "User Research",
    "User Testing", "User-Centered Design", "Ux Design Principles", "Ux Research",
    "Version Control", "Video Editing", "Vr And Ar Sdks", "Vr Platform Knowledge",
    "Web Accessibility", "Web Security", "Wireframing",
];

const ADDITIONAL_SKILLS: &[&str] = &[
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Jenkins", "Terraform", "Flask", "Django",
    "FastAPI", "Spring Boot", "Express.js", "Vue.js", "Angular", "TensorFlow", "PyTorch",
    "Scikit-learn", "Pandas", "NumPy", "Redux", "GraphQL", "TypeScript", "Sass", "Less",
    "Webpack", "Babel", "Jest", "Mocha", "Selenium", "Cypress", "JUnit", "Maven", "Gradle",
    "Redis", "PostgreSQL", "MySQL", "Oracle", "ElasticSearch", "Kafka", "RabbitMQ",
    "Microservices", "RESTful APIs", "SOAP", "OAuth", "JWT", "LDAP", "Active Directory", "Nginx",
    "Apache", "Linux", "Bash", "PowerShell", "Ansible", "Puppet", "Chef", "Prometheus",
    "Grafana", "ELK Stack", "Tableau", "Power BI", "Looker",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = SkillCatalog::builtin();

        assert!(catalog.len() > 200);
        let python = catalog.lookup("python").unwrap();
        assert_eq!(catalog.canonical(python), "Python");
        assert_eq!(catalog.term(python).lowered, "python");
        assert!(catalog.keywords().contains(&"machine learning".to_string()));
        assert!(catalog.is_stop_word("the"));
        assert!(!catalog.is_stop_word("rust"));
    }

    #[test]
    fn test_case_insensitive_duplicates_take_last_spelling() {
        let catalog = SkillCatalog::new(["Restful Apis", "Go", "RESTful APIs"], ["go"]).unwrap();

        assert_eq!(catalog.len(), 2);
        let id = catalog.lookup("restful apis").unwrap();
        assert_eq!(catalog.canonical(id), "RESTful APIs");
        assert_eq!(id, catalog.terms().next().unwrap().0);

        let builtin = SkillCatalog::builtin();
        let id = builtin.lookup("restful apis").unwrap();
        assert_eq!(builtin.canonical(id), "RESTful APIs");
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = SkillCatalog::new(Vec::<String>::new(), Vec::<String>::new());
        assert!(matches!(result, Err(RecommenderError::Catalog(_))));
    }

    #[test]
    fn test_toml_catalog() {
        let catalog = SkillCatalog::from_toml_str(
            "skills = [\"Rust\", \"Tokio\"]\nkeywords = [\"Rust Lang\"]",
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.keywords(), &["rust lang".to_string()]);

        assert!(SkillCatalog::from_toml_str("skills = 3").is_err());
    }
}
