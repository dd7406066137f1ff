//! Navigation state machine.
//!
//! The navigator owns the current [`View`] and the whole [`SessionContext`].
//! It is a pure reducer: [`Navigator::dispatch`] validates an [`Action`]
//! against the current view and context, then applies it and returns the
//! events it produced. A rejected action leaves everything untouched.
//!
//! ## Main flow
//!
//! ```text
//! landing -> signup-flow -> onboarding -> dashboard -> topic-search
//!   -> topic-overview -> ai-assessment -> custom-roadmap
//!   -> coding-assessment | job-assessment -> custom-roadmap
//! ```
//!
//! `Logout` is accepted everywhere and always lands on `landing`.

use chrono::Utc;
use tracing::{debug, info};

use super::action::Action;
use super::view::View;
use crate::assessment::{JobAssessmentOutcome, LearningPath, ProfilingAssessment, QuizResult};
use crate::catalog::{find_goal, CourseCatalog, Goal, Topic};
use crate::config::Config;
use crate::error::{CoreError, NavigationError, ValidationError};
use crate::events::Event;
use crate::module::Module;
use crate::roadmap::{CompletedSet, Roadmap, RoadmapBook, RoadmapReport, SkillStatus};
use crate::session::{AuthMode, LoginForm, Profile, ProfilePatch, SessionContext, SignupForm, User};
use crate::simulate::Pending;

/// Id given to the chain roadmap built over a learning path.
const PATH_ROADMAP_ID: &str = "learning-path";

#[derive(Debug, Clone)]
pub struct Navigator {
    view: View,
    ctx: SessionContext,
    config: Config,
    roadmaps: RoadmapBook,
    courses: CourseCatalog,
    /// View a practice screen returns to.
    practice_origin: Option<View>,
}

impl Navigator {
    /// Start on the landing view with an empty session and the built-in roadmaps.
    pub fn new(config: Config) -> Self {
        Self::with_roadmaps(config, RoadmapBook::builtin())
    }

    pub fn with_roadmaps(config: Config, roadmaps: RoadmapBook) -> Self {
        Self {
            view: View::Landing,
            ctx: SessionContext::default(),
            config,
            roadmaps,
            courses: CourseCatalog::builtin(),
            practice_origin: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn view(&self) -> View {
        self.view
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn roadmaps(&self) -> &RoadmapBook {
        &self.roadmaps
    }

    pub fn courses(&self) -> &CourseCatalog {
        &self.courses
    }

    /// Roadmap for the signed-in profile's goal.
    pub fn profile_roadmap(&self) -> Option<&Roadmap> {
        self.ctx
            .profile
            .as_ref()
            .map(|p| self.roadmaps.for_goal(&p.goal.id))
    }

    /// Dashboard view of the profile roadmap.
    pub fn dashboard_report(&self) -> Option<RoadmapReport> {
        let profile = self.ctx.profile.as_ref()?;
        Some(
            self.roadmaps
                .for_goal(&profile.goal.id)
                .report(&profile.completed_skills),
        )
    }

    /// The current learning path as a linear chain of modules.
    pub fn path_roadmap(&self) -> Option<Roadmap> {
        self.ctx
            .learning_path
            .as_ref()
            .map(|path| Roadmap::chain(PATH_ROADMAP_ID, path.topic.clone(), &path.modules))
    }

    pub fn path_report(&self) -> Option<RoadmapReport> {
        self.path_roadmap()
            .map(|roadmap| roadmap.report(&self.ctx.path_progress))
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let path_roadmap = self.path_roadmap();
        Event::StateSnapshot {
            view: self.view,
            user: self.ctx.user.as_ref().map(|u| u.name.clone()),
            goal: self.ctx.profile.as_ref().map(|p| p.goal.id.clone()),
            selected_topic: self.ctx.selected_topic.as_ref().map(|t| t.title.clone()),
            learning_path: self.ctx.learning_path.as_ref().map(|p| p.topic.clone()),
            path_progress_pct: path_roadmap.map(|r| r.progress_pct(&self.ctx.path_progress)),
            roadmap_progress_pct: self
                .ctx
                .profile
                .as_ref()
                .map(|p| self.roadmaps.for_goal(&p.goal.id).progress_pct(&p.completed_skills)),
            at: Utc::now(),
        }
    }

    // ── Simulated generation ─────────────────────────────────────────

    /// Start generating a learning path from the in-flight profiling answers.
    ///
    /// Must be called inside a tokio runtime. The navigator is not changed;
    /// feed the result back with [`Action::AssessmentCompleted`].
    pub fn begin_path_generation(&self) -> Result<Pending<LearningPath>, NavigationError> {
        if self.view != View::AiAssessment {
            return Err(NavigationError::IllegalTransition {
                from: self.view,
                action: "begin_path_generation",
            });
        }
        let assessment = self.ctx.assessment.as_ref().ok_or(NavigationError::MissingPayload {
            view: View::AiAssessment,
            payload: "a profiling assessment",
        })?;
        Ok(crate::assessment::spawn_path_generation(
            assessment.topic.clone(),
            assessment.answers().to_vec(),
            self.config.simulation.path_generation_delay(),
        ))
    }

    /// Generate the learning path, wait for it and complete the assessment.
    pub async fn complete_assessment(&mut self) -> Result<Vec<Event>, CoreError> {
        let path = self.begin_path_generation()?.wait().await?;
        Ok(self.dispatch(Action::AssessmentCompleted { path })?)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply one action.
    ///
    /// # Errors
    ///
    /// Returns a [`NavigationError`] when the action is not valid from the
    /// current view or its guard fails. State is unchanged in that case.
    pub fn dispatch(&mut self, action: Action) -> Result<Vec<Event>, NavigationError> {
        let name = action.name();
        let from = self.view;
        let result = self.reduce(action);
        match &result {
            Ok(events) => debug!(action = name, %from, to = %self.view, events = events.len(), "dispatched"),
            Err(e) => debug!(action = name, %from, error = %e, "rejected"),
        }
        result
    }

    fn reduce(&mut self, action: Action) -> Result<Vec<Event>, NavigationError> {
        match (self.view, action) {
            (_, Action::Logout) => Ok(self.logout()),

            (View::Landing, Action::Login) => Ok(self.begin_auth(AuthMode::Login)),
            (View::Landing, Action::Signup) => Ok(self.begin_auth(AuthMode::Signup)),
            (View::SignupFlow, Action::Back) => {
                self.ctx.auth_mode = None;
                Ok(self.goto(View::Landing))
            }
            (View::SignupFlow, Action::SubmitLogin { form }) => self.submit_login(form),
            (View::SignupFlow, Action::SubmitSignup { form }) => self.submit_signup(form),
            (View::Onboarding, Action::CompleteOnboarding { goal_id, skill_ratings }) => {
                self.complete_onboarding(goal_id, skill_ratings)
            }

            (View::Dashboard, Action::BrowseTopics) => Ok(self.goto(View::TopicSearch)),
            (View::Dashboard | View::TopicSearch, Action::SelectTopic { topic }) => {
                Ok(self.select_topic(topic))
            }
            (View::Dashboard, Action::MarkSkillComplete { skill_id }) => self.mark_skill(skill_id),
            (View::Dashboard, Action::SkillQuizFinished { skill_id, result }) => {
                self.skill_quiz_finished(skill_id, result)
            }
            (View::Dashboard, Action::EnrollCourse { course_id }) => self.enroll(course_id),
            (View::Dashboard | View::CustomRoadmap, Action::StartModule { module }) => {
                self.start_module(module)
            }

            (View::TopicOverview, Action::StartAssessment) => self.start_assessment(),
            (View::TopicOverview | View::CustomRoadmap, Action::Back) => {
                self.ctx.selected_topic = None;
                Ok(self.goto(View::TopicSearch))
            }

            (View::AiAssessment, Action::AnswerProfiling { choice }) => self.answer_profiling(choice),
            (View::AiAssessment, Action::AssessmentCompleted { path }) => {
                Ok(self.assessment_completed(path))
            }
            (View::AiAssessment, Action::Back) => Ok(self.goto(View::TopicOverview)),

            (View::CustomRoadmap, Action::OpenModule { module_id }) => self.open_module(module_id),
            (View::CustomRoadmap, Action::MarkModuleComplete { module_id }) => {
                self.mark_module(module_id)
            }

            (View::CodingAssessment, Action::CodingFinished { passed }) => {
                self.coding_finished(passed)
            }
            (View::JobAssessment, Action::JobAssessmentFinished { outcome }) => {
                self.job_finished(outcome)
            }
            (View::CodingAssessment | View::JobAssessment, Action::Back) => {
                let origin = self.practice_return()?;
                Ok(self.goto(origin))
            }

            (view, Action::OpenDashboard) if view.requires_auth() => self.open_dashboard(),
            (view, Action::UpdateProfile { patch }) if view.requires_auth() => {
                self.update_profile(patch)
            }

            (from, action) => Err(NavigationError::IllegalTransition {
                from,
                action: action.name(),
            }),
        }
    }

    /// Move to `to`, dropping state that only lives inside the view being left.
    fn goto(&mut self, to: View) -> Vec<Event> {
        let from = self.view;
        if from == to {
            return Vec::new();
        }
        match from {
            View::AiAssessment => self.ctx.assessment = None,
            View::CodingAssessment | View::JobAssessment => {
                self.ctx.current_module = None;
                self.practice_origin = None;
            }
            _ => {}
        }
        self.view = to;
        vec![Event::ViewChanged {
            from,
            to,
            at: Utc::now(),
        }]
    }

    fn logout(&mut self) -> Vec<Event> {
        let signed_in = self.ctx.user.take().map(|user| {
            info!(user_id = %user.id, "session ended");
            Event::SignedOut { at: Utc::now() }
        });
        let mut events = self.goto(View::Landing);
        self.ctx = SessionContext::default();
        self.practice_origin = None;
        if let Some(event) = signed_in {
            events.insert(0, event);
        }
        events
    }

    fn begin_auth(&mut self, mode: AuthMode) -> Vec<Event> {
        self.ctx.auth_mode = Some(mode);
        self.goto(View::SignupFlow)
    }

    fn expect_auth_mode(&self, mode: AuthMode, action: &'static str) -> Result<(), NavigationError> {
        if self.ctx.auth_mode == Some(mode) {
            Ok(())
        } else {
            Err(NavigationError::IllegalTransition {
                from: self.view,
                action,
            })
        }
    }

    fn sign_in(&mut self, user: User) -> Event {
        info!(user_id = %user.id, "session started");
        let event = Event::SignedIn {
            user_id: user.id.clone(),
            name: user.name.clone(),
            at: Utc::now(),
        };
        self.ctx.user = Some(user);
        self.ctx.auth_mode = None;
        event
    }

    fn install_profile(&mut self, profile: Profile) -> Event {
        let event = Event::ProfileCreated {
            goal_id: profile.goal.id.clone(),
            streak: profile.streak,
            completed_skills: profile.completed_skills.len(),
            at: Utc::now(),
        };
        self.ctx.profile = Some(profile);
        event
    }

    fn submit_login(&mut self, form: LoginForm) -> Result<Vec<Event>, NavigationError> {
        self.expect_auth_mode(AuthMode::Login, "submit_login")?;
        form.validate()?;

        let session = &self.config.session;
        let goal = find_goal(&session.default_goal).unwrap_or_else(|| Goal {
            id: session.default_goal.clone(),
            title: session.default_goal.clone(),
        });
        let profile = Profile {
            goal,
            streak: session.starter_streak,
            completed_skills: session.starter_completed.iter().copied().collect(),
            skill_ratings: Default::default(),
        };

        let mut events = vec![self.sign_in(User::new(form.name, form.email))];
        events.push(self.install_profile(profile));
        events.extend(self.goto(View::Dashboard));
        Ok(events)
    }

    fn submit_signup(&mut self, form: SignupForm) -> Result<Vec<Event>, NavigationError> {
        self.expect_auth_mode(AuthMode::Signup, "submit_signup")?;
        form.validate()?;

        let mut events = vec![self.sign_in(User::new(form.name, form.email))];
        events.extend(self.goto(View::Onboarding));
        Ok(events)
    }

    fn complete_onboarding(
        &mut self,
        goal_id: String,
        skill_ratings: std::collections::BTreeMap<String, u8>,
    ) -> Result<Vec<Event>, NavigationError> {
        if !self.ctx.is_authenticated() {
            return Err(NavigationError::NotAuthenticated);
        }
        let goal = find_goal(&goal_id).ok_or_else(|| ValidationError::InvalidValue {
            field: "goal".into(),
            message: format!("unknown goal '{goal_id}'"),
        })?;
        if let Some((skill, rating)) = skill_ratings.iter().find(|(_, r)| !(1..=5).contains(*r)) {
            return Err(ValidationError::InvalidValue {
                field: format!("skill_ratings.{skill}"),
                message: format!("rating {rating} is outside 1-5"),
            }
            .into());
        }

        let profile = Profile {
            goal,
            streak: 0,
            completed_skills: CompletedSet::new(),
            skill_ratings,
        };
        let mut events = vec![self.install_profile(profile)];
        events.extend(self.goto(View::Dashboard));
        Ok(events)
    }

    fn open_dashboard(&mut self) -> Result<Vec<Event>, NavigationError> {
        if !self.ctx.is_authenticated() {
            return Err(NavigationError::NotAuthenticated);
        }
        if self.ctx.profile.is_none() {
            return Err(NavigationError::MissingPayload {
                view: View::Dashboard,
                payload: "a profile",
            });
        }
        Ok(self.goto(View::Dashboard))
    }

    fn update_profile(&mut self, patch: ProfilePatch) -> Result<Vec<Event>, NavigationError> {
        patch.validate()?;
        let user = self.ctx.user.as_mut().ok_or(NavigationError::NotAuthenticated)?;
        user.apply(&patch);
        Ok(vec![Event::ProfileUpdated {
            user_id: user.id.clone(),
            at: Utc::now(),
        }])
    }

    fn select_topic(&mut self, topic: Topic) -> Vec<Event> {
        let mut events = vec![Event::TopicSelected {
            topic_id: topic.id,
            title: topic.title.clone(),
            at: Utc::now(),
        }];
        self.ctx.selected_topic = Some(topic);
        events.extend(self.goto(View::TopicOverview));
        events
    }

    /// Check that `skill_id` can be marked on the profile roadmap.
    /// `Ok(false)` means it is already complete.
    fn check_skill(&self, skill_id: u32) -> Result<bool, NavigationError> {
        let profile = self.ctx.profile.as_ref().ok_or(NavigationError::MissingPayload {
            view: View::Dashboard,
            payload: "a profile",
        })?;
        let roadmap = self.roadmaps.for_goal(&profile.goal.id);
        match roadmap.status_of(skill_id, &profile.completed_skills) {
            None => Err(NavigationError::UnknownSkill(skill_id)),
            Some(SkillStatus::Locked) => Err(NavigationError::SkillLocked(skill_id)),
            Some(SkillStatus::Completed) => Ok(false),
            Some(SkillStatus::Current) => Ok(true),
        }
    }

    fn mark_skill(&mut self, skill_id: u32) -> Result<Vec<Event>, NavigationError> {
        if !self.check_skill(skill_id)? {
            return Ok(Vec::new());
        }
        Ok(self.apply_skill(skill_id).into_iter().collect())
    }

    fn apply_skill(&mut self, skill_id: u32) -> Option<Event> {
        let profile = self.ctx.profile.as_mut()?;
        if !profile.completed_skills.insert(skill_id) {
            return None;
        }
        let progress_pct = self
            .roadmaps
            .for_goal(&profile.goal.id)
            .progress_pct(&profile.completed_skills);
        Some(Event::SkillCompleted {
            skill_id,
            progress_pct,
            at: Utc::now(),
        })
    }

    fn skill_quiz_finished(
        &mut self,
        skill_id: u32,
        result: QuizResult,
    ) -> Result<Vec<Event>, NavigationError> {
        if result.correct > result.total {
            return Err(ValidationError::InvalidValue {
                field: "result.correct".into(),
                message: format!("{} correct out of {}", result.correct, result.total),
            }
            .into());
        }
        // Score and pass flag are derived here, never taken from the caller.
        let result = QuizResult::from_counts(
            result.correct,
            result.total,
            self.config.assessment.pass_threshold,
        );
        let unlocked = match self.check_skill(skill_id) {
            Err(NavigationError::SkillLocked(_)) if !result.passed => false,
            other => other?,
        };
        let mut events = vec![Event::QuizFinished {
            skill_id,
            score: result.score,
            passed: result.passed,
            at: Utc::now(),
        }];
        if result.passed && unlocked {
            events.extend(self.apply_skill(skill_id));
        }
        Ok(events)
    }

    fn enroll(&mut self, course_id: u32) -> Result<Vec<Event>, NavigationError> {
        let course = self
            .courses
            .get(course_id)
            .ok_or(NavigationError::UnknownCourse(course_id))?;
        if !self.ctx.enrolled_courses.insert(course_id) {
            return Ok(Vec::new());
        }
        Ok(vec![Event::CourseEnrolled {
            course_id,
            title: course.title.clone(),
            at: Utc::now(),
        }])
    }

    fn start_module(&mut self, module: Module) -> Result<Vec<Event>, NavigationError> {
        if self.view == View::CustomRoadmap {
            self.check_module_unlocked(module.id())?;
        }
        let mut events = vec![Event::ModuleStarted {
            module_id: module.id(),
            kind: module.kind(),
            at: Utc::now(),
        }];
        let target = module.practice_view();
        let origin = self.view;
        events.extend(self.goto(target));
        self.ctx.current_module = Some(module);
        self.practice_origin = Some(origin);
        Ok(events)
    }

    fn check_module_unlocked(&self, module_id: u32) -> Result<(), NavigationError> {
        let roadmap = self.path_roadmap().ok_or(NavigationError::MissingPayload {
            view: View::CustomRoadmap,
            payload: "a learning path",
        })?;
        match roadmap.status_of(module_id, &self.ctx.path_progress) {
            None => Err(NavigationError::UnknownModule(module_id)),
            Some(SkillStatus::Locked) => Err(NavigationError::ModuleLocked(module_id)),
            Some(_) => Ok(()),
        }
    }

    fn start_assessment(&mut self) -> Result<Vec<Event>, NavigationError> {
        let topic = self.ctx.selected_topic.as_ref().ok_or(NavigationError::MissingPayload {
            view: View::AiAssessment,
            payload: "a selected topic",
        })?;
        let assessment = ProfilingAssessment::new(topic.title.clone());
        let mut events = vec![Event::AssessmentStarted {
            topic: assessment.topic.clone(),
            questions: assessment.questions().len(),
            at: Utc::now(),
        }];
        events.extend(self.goto(View::AiAssessment));
        self.ctx.assessment = Some(assessment);
        Ok(events)
    }

    fn answer_profiling(&mut self, choice: usize) -> Result<Vec<Event>, NavigationError> {
        let assessment = self.ctx.assessment.as_mut().ok_or(NavigationError::MissingPayload {
            view: View::AiAssessment,
            payload: "a profiling assessment",
        })?;
        let question_id = assessment.answer(choice)?.question_id;
        let progress = assessment.progress();
        Ok(vec![Event::AssessmentAnswered {
            question_id,
            answered: progress.answered,
            total: progress.total_questions,
            at: Utc::now(),
        }])
    }

    fn assessment_completed(&mut self, path: LearningPath) -> Vec<Event> {
        let mut events = vec![Event::LearningPathReady {
            topic: path.topic.clone(),
            difficulty: path.difficulty,
            duration: path.duration,
            modules: path.modules.len(),
            at: Utc::now(),
        }];
        self.ctx.set_learning_path(path);
        events.extend(self.goto(View::CustomRoadmap));
        events
    }

    fn open_module(&mut self, module_id: u32) -> Result<Vec<Event>, NavigationError> {
        self.check_module_unlocked(module_id)?;
        Ok(vec![Event::ModuleOpened {
            module_id,
            at: Utc::now(),
        }])
    }

    fn mark_module(&mut self, module_id: u32) -> Result<Vec<Event>, NavigationError> {
        let roadmap = self.path_roadmap().ok_or(NavigationError::MissingPayload {
            view: View::CustomRoadmap,
            payload: "a learning path",
        })?;
        if roadmap.get(module_id).is_none() {
            return Err(NavigationError::UnknownModule(module_id));
        }
        if !self.ctx.path_progress.insert(module_id) {
            return Ok(Vec::new());
        }
        Ok(vec![Event::ModuleCompleted {
            module_id,
            progress_pct: roadmap.progress_pct(&self.ctx.path_progress),
            at: Utc::now(),
        }])
    }

    /// Where a practice view returns to, checking that view's payload.
    fn practice_return(&self) -> Result<View, NavigationError> {
        let origin = self.practice_origin.unwrap_or(View::CustomRoadmap);
        if origin == View::CustomRoadmap && self.ctx.learning_path.is_none() {
            return Err(NavigationError::MissingPayload {
                view: View::CustomRoadmap,
                payload: "a learning path",
            });
        }
        Ok(origin)
    }

    fn coding_finished(&mut self, passed: bool) -> Result<Vec<Event>, NavigationError> {
        let origin = self.practice_return()?;
        let module_id = self.ctx.current_module.as_ref().map(Module::id);
        let mut events = vec![Event::CodingFinished {
            module_id,
            passed,
            at: Utc::now(),
        }];
        if let (true, Some(id), View::CustomRoadmap) = (passed, module_id, origin) {
            if let Some(roadmap) = self.path_roadmap() {
                if roadmap.get(id).is_some() && self.ctx.path_progress.insert(id) {
                    events.push(Event::ModuleCompleted {
                        module_id: id,
                        progress_pct: roadmap.progress_pct(&self.ctx.path_progress),
                        at: Utc::now(),
                    });
                }
            }
        }
        events.extend(self.goto(origin));
        Ok(events)
    }

    fn job_finished(&mut self, outcome: JobAssessmentOutcome) -> Result<Vec<Event>, NavigationError> {
        let origin = self.practice_return()?;
        let mut events = vec![Event::JobAssessmentFinished {
            role: outcome.role.role.clone(),
            score: outcome.score.score,
            tier: outcome.tier,
            at: Utc::now(),
        }];
        self.ctx.last_job_outcome = Some(outcome);
        events.extend(self.goto(origin));
        Ok(events)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
