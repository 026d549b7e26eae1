use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GraphIntegrityError, IntegrityProblem, StoryError, StoryResult};
use crate::scene::{Scene, SceneId};

/// Metadata about the story itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoryMeta {
    /// Display title.
    pub title: String,
    /// Scene entered at game start and after every restart.
    pub start: SceneId,
    /// Scene shown in place of a gated scene the player cannot enter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<SceneId>,
    /// Scene entered once the player runs out of time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<SceneId>,
}

impl StoryMeta {
    /// Create metadata with the given title and start scene.
    pub fn new(title: impl Into<String>, start: impl Into<SceneId>) -> Self {
        Self {
            title: title.into(),
            start: start.into(),
            fallback: None,
            timeout: None,
        }
    }

    /// Set the fallback scene for gated scenes.
    pub fn with_fallback(mut self, fallback: impl Into<SceneId>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Set the scene entered when time runs out.
    pub fn with_timeout(mut self, timeout: impl Into<SceneId>) -> Self {
        self.timeout = Some(timeout.into());
        self
    }
}

/// On-disk story layout, validated into a [`StoryGraph`].
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StoryFile {
    meta: StoryMeta,
    scenes: BTreeMap<SceneId, Scene>,
}

/// The immutable, validated story graph.
#[derive(Debug, Clone, Serialize)]
pub struct StoryGraph {
    /// Story metadata.
    pub meta: StoryMeta,
    scenes: BTreeMap<SceneId, Scene>,
}

impl StoryGraph {
    /// Build a graph, rejecting it if any reference dangles.
    pub fn new(meta: StoryMeta, scenes: BTreeMap<SceneId, Scene>) -> StoryResult<Self> {
        let graph = Self { meta, scenes };
        graph.validate()?;
        Ok(graph)
    }

    /// Parse and validate a story from JSON.
    pub fn from_json(source: &str) -> StoryResult<Self> {
        let file: StoryFile = serde_json::from_str(source)?;
        Self::new(file.meta, file.scenes)
    }

    /// Read, parse, and validate a story file.
    pub fn from_path(path: &Path) -> StoryResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| StoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Serialize the graph back to pretty JSON.
    pub fn to_json(&self) -> StoryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a scene.
    pub fn get(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Whether a scene exists.
    pub fn contains(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    /// All scenes, ordered by id.
    pub fn scenes(&self) -> impl Iterator<Item = (&SceneId, &Scene)> {
        self.scenes.iter()
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the graph has no scenes. A validated graph never is.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// The start scene id.
    pub fn start(&self) -> &SceneId {
        &self.meta.start
    }

    /// The fallback scene id, if declared.
    pub fn fallback(&self) -> Option<&SceneId> {
        self.meta.fallback.as_ref()
    }

    /// The timeout scene id, if declared.
    pub fn timeout(&self) -> Option<&SceneId> {
        self.meta.timeout.as_ref()
    }

    /// Number of ending scenes.
    pub fn ending_count(&self) -> usize {
        self.scenes.values().filter(|s| s.is_ending).count()
    }

    /// Check every reference in the graph and collect all problems.
    pub fn validate(&self) -> Result<(), GraphIntegrityError> {
        let mut problems = Vec::new();

        if !self.contains(self.meta.start.as_str()) {
            problems.push(IntegrityProblem::MissingStart(self.meta.start.clone()));
        }

        if let Some(fallback) = &self.meta.fallback {
            match self.get(fallback.as_str()) {
                None => problems.push(IntegrityProblem::MissingFallback(fallback.clone())),
                Some(scene) if scene.required_item.is_some() => {
                    problems.push(IntegrityProblem::GatedFallback(fallback.clone()));
                }
                Some(_) => {}
            }
        }

        let missing_timeout = self
            .meta
            .timeout
            .as_ref()
            .filter(|timeout| !self.contains(timeout.as_str()));
        if let Some(timeout) = missing_timeout {
            problems.push(IntegrityProblem::MissingTimeout(timeout.clone()));
        }

        for (id, scene) in &self.scenes {
            if let (Some(item), None) = (&scene.required_item, &self.meta.fallback) {
                problems.push(IntegrityProblem::GateWithoutFallback {
                    scene: id.clone(),
                    item: item.clone(),
                });
            }

            if scene.is_ending {
                if !scene.choices().is_empty() {
                    problems.push(IntegrityProblem::EndingWithChoices(id.clone()));
                }
                continue;
            }

            if scene.choices().is_empty() {
                problems.push(IntegrityProblem::DeadEnd(id.clone()));
            }

            for choice in scene.choices() {
                if !self.contains(choice.next.as_str()) {
                    problems.push(IntegrityProblem::DanglingChoice {
                        scene: id.clone(),
                        choice: choice.text.clone(),
                        target: choice.next.clone(),
                    });
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(GraphIntegrityError { problems })
        }
    }

    /// Scenes reachable from the start by following choices, including the
    /// fallback and timeout scenes the interpreter may substitute.
    pub fn reachable(&self) -> BTreeSet<&SceneId> {
        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<&SceneId> = VecDeque::new();

        queue.push_back(&self.meta.start);
        queue.extend(self.meta.fallback.iter());
        queue.extend(self.meta.timeout.iter());

        while let Some(id) = queue.pop_front() {
            let Some((key, scene)) = self.scenes.get_key_value(id.as_str()) else {
                continue;
            };
            if !seen.insert(key) {
                continue;
            }
            for choice in scene.choices() {
                queue.push_back(&choice.next);
            }
        }

        seen
    }

    /// Scenes no play-through can ever show.
    pub fn unreachable(&self) -> Vec<&SceneId> {
        let reachable = self.reachable();
        self.scenes
            .keys()
            .filter(|id| !reachable.contains(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Choice, ChoiceEffects};

    fn scenes(list: Vec<(&str, Scene)>) -> BTreeMap<SceneId, Scene> {
        list.into_iter().map(|(id, s)| (SceneId::from(id), s)).collect()
    }

    fn small_story() -> StoryGraph {
        StoryGraph::new(
            StoryMeta::new("Small", "start"),
            scenes(vec![
                (
                    "start",
                    Scene::new("Two doors.")
                        .with_choice(Choice::new("Red", "fire"))
                        .with_choice(Choice::new("Blue", "ice")),
                ),
                ("fire", Scene::ending("A roaring inferno.")),
                ("ice", Scene::ending("An endless frozen wasteland.")),
            ]),
        )
        .unwrap()
    }

    #[test]
    fn lookup_scenes() {
        let story = small_story();
        assert_eq!(story.len(), 3);
        assert_eq!(story.ending_count(), 2);
        assert!(story.get("fire").unwrap().is_ending);
        assert!(story.get("nowhere").is_none());
        assert_eq!(story.start().as_str(), "start");
    }

    #[test]
    fn dangling_references_are_all_reported() {
        let err = StoryGraph::new(
            StoryMeta::new("Broken", "begin"),
            scenes(vec![(
                "start",
                Scene::new("Hallway.")
                    .with_choice(Choice::new("Left", "left"))
                    .with_choice(Choice::new("Right", "right")),
            )]),
        )
        .unwrap_err();

        let StoryError::Integrity(err) = err else {
            panic!("expected integrity error, got {err:?}");
        };
        assert_eq!(err.problems.len(), 3);
        assert!(err
            .problems
            .contains(&IntegrityProblem::MissingStart(SceneId::from("begin"))));
        assert!(err.problems.iter().any(|p| matches!(
            p,
            IntegrityProblem::DanglingChoice { target, .. } if target.as_str() == "right"
        )));
    }

    #[test]
    fn gate_without_fallback_is_rejected() {
        let err = StoryGraph::new(
            StoryMeta::new("Gated", "start"),
            scenes(vec![
                ("start", Scene::new("Door.").with_choice(Choice::new("Open", "vault"))),
                ("vault", Scene::ending("Gold.").with_required_item("key")),
            ]),
        )
        .unwrap_err();

        assert!(err.to_string().contains("requires item \"key\""));
    }

    #[test]
    fn undefined_fallback_is_rejected() {
        let err = StoryGraph::new(
            StoryMeta::new("Gated", "start").with_fallback("missing_item_fallback"),
            scenes(vec![
                ("start", Scene::new("Door.").with_choice(Choice::new("Open", "vault"))),
                ("vault", Scene::ending("Gold.").with_required_item("key")),
            ]),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            StoryError::Integrity(GraphIntegrityError { ref problems })
                if problems == &[IntegrityProblem::MissingFallback(SceneId::from("missing_item_fallback"))]
        ));
    }

    #[test]
    fn gated_fallback_is_rejected() {
        let err = StoryGraph::new(
            StoryMeta::new("Gated", "start").with_fallback("locked"),
            scenes(vec![
                ("start", Scene::new("Door.").with_choice(Choice::new("Open", "locked"))),
                ("locked", Scene::ending("Locked.").with_required_item("key")),
            ]),
        )
        .unwrap_err();

        assert!(err.to_string().contains("must not require an item"));
    }

    #[test]
    fn shape_problems_are_rejected() {
        let mut ending = Scene::ending("Done.");
        ending.choices = Some(vec![Choice::new("Again", "start")]);

        let err = StoryGraph::new(
            StoryMeta::new("Shapes", "start"),
            scenes(vec![("start", Scene::new("Nothing to do.")), ("end", ending)]),
        )
        .unwrap_err();

        let text = err.to_string();
        assert!(text.contains("scene \"start\" is not an ending but has no choices"));
        assert!(text.contains("ending \"end\" has choices"));
    }

    #[test]
    fn missing_timeout_is_rejected() {
        let err = StoryGraph::new(
            StoryMeta::new("Clock", "start").with_timeout("midnight"),
            scenes(vec![("start", Scene::ending("Over."))]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("timeout scene \"midnight\""));
    }

    #[test]
    fn reachability() {
        let mut list = vec![
            (
                "start",
                Scene::new("Room.").with_choice(
                    Choice::new("Go", "end").with_effects(ChoiceEffects::time_cost(10)),
                ),
            ),
            ("end", Scene::ending("Out.")),
        ];
        list.push(("orphan", Scene::ending("Nobody comes here.")));
        let story = StoryGraph::new(StoryMeta::new("Reach", "start"), scenes(list)).unwrap();

        let reachable = story.reachable();
        assert!(reachable.contains(&SceneId::from("start")));
        assert!(reachable.contains(&SceneId::from("end")));
        assert_eq!(story.unreachable(), vec![&SceneId::from("orphan")]);
    }

    #[test]
    fn json_round_trip_keeps_meta() {
        let story = small_story();
        let json = story.to_json().unwrap();
        let parsed = StoryGraph::from_json(&json).unwrap();
        assert_eq!(parsed.meta, story.meta);
        assert_eq!(parsed.len(), story.len());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = StoryGraph::from_json("{ not json").unwrap_err();
        assert!(matches!(err, StoryError::Parse(_)));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        let err = StoryGraph::from_path(&path).unwrap_err();
        assert!(matches!(err, StoryError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn from_path_loads_story() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("story.json");
        std::fs::write(&path, small_story().to_json().unwrap()).unwrap();
        let story = StoryGraph::from_path(&path).unwrap();
        assert_eq!(story.meta.title, "Small");
    }
}
