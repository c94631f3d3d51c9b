//! Synonym table — ordered groups of equivalent skill spellings.
//!
//! The table is built once at startup, wrapped in an `Arc`, and only ever read
//! afterwards. Resolution is first-match-wins over the insertion order, so the
//! order of [`DEFAULT_SYNONYMS`] is part of the matching behaviour.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::matching::normalize::normalize;

/// Shipped synonym data, in resolution order.
///
/// Known collision: `"ai"` is listed under both `ml` and `illustrator`.
/// `ml` comes first and wins. Fix it here, not in the lookup.
pub const DEFAULT_SYNONYMS: &[(&str, &[&str])] = &[
    ("javascript", &["js", "javascript", "ecmascript", "es6", "es2015", "es2020"]),
    ("typescript", &["ts", "typescript"]),
    ("react", &["react", "reactjs", "react.js", "react js"]),
    ("angular", &["angular", "angularjs", "angular.js", "angular2", "angular 2"]),
    ("vue", &["vue", "vuejs", "vue.js", "vue js"]),
    ("node", &["node", "nodejs", "node.js", "node js"]),
    ("express", &["express", "expressjs", "express.js"]),
    ("mongodb", &["mongodb", "mongo", "mongo db"]),
    ("sql", &["sql", "mysql", "postgresql", "postgres", "mssql", "oracle", "sql server"]),
    ("nosql", &["nosql", "no sql", "no-sql"]),
    ("aws", &["aws", "amazon web services"]),
    ("docker", &["docker", "containerization", "containers"]),
    ("kubernetes", &["kubernetes", "k8s"]),
    ("python", &["python", "py"]),
    ("java", &["java", "jdk", "jvm"]),
    ("csharp", &["c#", "csharp", "c sharp", ".net", "dotnet", "asp.net"]),
    ("cpp", &["c++", "cpp", "cplusplus"]),
    ("html", &["html", "html5"]),
    ("css", &["css", "css3", "cascading style sheets"]),
    ("tailwind", &["tailwind", "tailwindcss", "tailwind css"]),
    ("bootstrap", &["bootstrap", "bootstrap css"]),
    ("rest", &["rest", "restful", "rest api", "restful api"]),
    ("graphql", &["graphql", "graph ql"]),
    ("git", &["git", "github", "gitlab", "version control"]),
    ("cicd", &["ci/cd", "cicd", "continuous integration", "continuous deployment"]),
    ("devops", &["devops", "dev ops"]),
    ("agile", &["agile", "scrum", "kanban"]),
    ("redux", &["redux", "redux toolkit"]),
    ("nextjs", &["next.js", "nextjs", "next js", "next"]),
    ("django", &["django", "django rest framework", "drf"]),
    ("flask", &["flask", "flask-restful"]),
    ("spring", &["spring", "spring boot", "spring framework"]),
    ("laravel", &["laravel", "laravel framework"]),
    ("ruby", &["ruby", "ruby on rails", "rails", "ror"]),
    ("php", &["php", "php7", "php8"]),
    ("swift", &["swift", "swift ui", "swiftui"]),
    ("kotlin", &["kotlin", "kotlin jvm"]),
    ("flutter", &["flutter", "dart", "flutter framework"]),
    ("reactnative", &["react native", "react-native", "reactnative", "rn"]),
    ("ml", &["machine learning", "ml", "artificial intelligence", "ai", "deep learning"]),
    ("tensorflow", &["tensorflow", "tf", "tensor flow"]),
    ("pytorch", &["pytorch", "torch", "py torch"]),
    ("azure", &["azure", "microsoft azure"]),
    ("gcp", &["gcp", "google cloud", "google cloud platform"]),
    ("firebase", &["firebase", "firestore", "firebase auth"]),
    ("linux", &["linux", "unix", "ubuntu", "centos"]),
    ("terraform", &["terraform", "iac", "infrastructure as code"]),
    ("jenkins", &["jenkins", "jenkins ci"]),
    ("redis", &["redis", "cache", "in-memory database"]),
    ("nginx", &["nginx", "reverse proxy"]),
    ("apache", &["apache", "apache server"]),
    ("microservices", &["microservices", "micro services", "microservice architecture"]),
    ("api", &["api", "apis", "application programming interface"]),
    ("sass", &["sass", "scss"]),
    ("webpack", &["webpack", "bundler"]),
    ("vite", &["vite", "vite.js"]),
    ("jest", &["jest", "testing", "unit testing"]),
    ("cypress", &["cypress", "e2e testing"]),
    ("figma", &["figma", "design"]),
    ("photoshop", &["photoshop", "ps"]),
    ("illustrator", &["illustrator", "ai"]),
    ("xd", &["xd", "adobe xd"]),
];

/// A named set of equivalent canonical spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymGroup {
    pub key: String,
    pub variants: Vec<String>,
}

impl SynonymGroup {
    pub fn contains(&self, normalized: &str) -> bool {
        self.variants.iter().any(|v| v == normalized)
    }
}

/// A variant listed in more than one group. Only `resolved_key` is ever used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymCollision {
    pub variant: String,
    pub resolved_key: String,
    pub shadowed_key: String,
}

#[derive(Debug, Clone)]
pub struct SynonymTable {
    groups: Vec<SynonymGroup>,
    /// Variant → index of the first group listing it.
    index: HashMap<String, usize>,
}

impl SynonymTable {
    /// Builds a table from `(key, variants)` pairs, keeping their order.
    /// Variants are normalized so lookups compare canonical forms only;
    /// duplicates inside one group are dropped.
    pub fn new<'a, I>(groups: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let groups: Vec<SynonymGroup> = groups
            .into_iter()
            .map(|(key, variants)| {
                let mut normalized: Vec<String> = Vec::with_capacity(variants.len());
                for variant in variants {
                    let v = normalize(variant);
                    if !v.is_empty() && !normalized.contains(&v) {
                        normalized.push(v);
                    }
                }
                SynonymGroup {
                    key: key.to_string(),
                    variants: normalized,
                }
            })
            .collect();

        let mut index = HashMap::new();
        for (i, group) in groups.iter().enumerate() {
            for variant in &group.variants {
                index.entry(variant.clone()).or_insert(i);
            }
        }

        Self { groups, index }
    }

    pub fn groups(&self) -> &[SynonymGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// First group (in table order) containing `normalized`.
    pub fn find_group(&self, normalized: &str) -> Option<&SynonymGroup> {
        self.index.get(normalized).map(|&i| &self.groups[i])
    }

    /// Variant list for `skill`, borrowed from the table when a group matches.
    pub fn variants(&self, skill: &str) -> Cow<'_, [String]> {
        let normalized = normalize(skill);
        match self.find_group(&normalized) {
            Some(group) => Cow::Borrowed(group.variants.as_slice()),
            None => Cow::Owned(vec![normalized]),
        }
    }

    /// Like [`variants`](Self::variants) for an already normalized string.
    pub fn lookup(&self, normalized: &str) -> Cow<'_, [String]> {
        match self.find_group(normalized) {
            Some(group) => Cow::Borrowed(group.variants.as_slice()),
            None => Cow::Owned(vec![normalized.to_string()]),
        }
    }

    /// Full variant set of `skill`, or just its canonical form when no group
    /// lists it. Always contains `normalize(skill)`.
    pub fn expand_variants(&self, skill: &str) -> Vec<String> {
        self.variants(skill).into_owned()
    }

    /// Order-preserving union of the expansions of every skill in `skills`.
    pub fn expand_all<S: AsRef<str>>(&self, skills: &[S]) -> Vec<String> {
        let mut expanded: Vec<String> = Vec::new();
        for skill in skills {
            for variant in self.variants(skill.as_ref()).iter() {
                if !expanded.contains(variant) {
                    expanded.push(variant.clone());
                }
            }
        }
        expanded
    }

    /// Variants that appear in more than one group.
    pub fn collisions(&self) -> Vec<SynonymCollision> {
        let mut found = Vec::new();
        for (i, group) in self.groups.iter().enumerate() {
            for later in &self.groups[i + 1..] {
                for variant in &group.variants {
                    if later.contains(variant) {
                        found.push(SynonymCollision {
                            variant: variant.clone(),
                            resolved_key: group.key.clone(),
                            shadowed_key: later.key.clone(),
                        });
                    }
                }
            }
        }
        found
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::new(DEFAULT_SYNONYMS.iter().copied())
    }
}
