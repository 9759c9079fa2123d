//! Headless state for the four-step try-on workflow.
//!
//! The component layer owns the browser side effects (object URLs, network
//! calls, timers); this module owns the transitions and their guards. Every
//! mutation that retires a local preview handle returns it, so the caller can
//! revoke each one exactly once.

/// Browser object URL backing a local preview. Created on selection,
/// revoked exactly once on replacement or teardown.
pub type PreviewUrl = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    SelectUser,
    SelectClothing,
    Processing,
    Result,
}

/// One side of the submission: the person photo or the clothing photo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoSlot {
    file_name: Option<String>,
    preview: Option<PreviewUrl>,
    server_ref: Option<String>,
}

impl PhotoSlot {
    pub fn is_picked(&self) -> bool {
        self.file_name.is_some()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn server_ref(&self) -> Option<&str> {
        self.server_ref.as_deref()
    }

    fn select(&mut self, file_name: String, preview: PreviewUrl) -> Option<PreviewUrl> {
        let replaced = self.preview.take();
        self.file_name = Some(file_name);
        self.preview = Some(preview);
        self.server_ref = None;
        replaced
    }

    fn clear(&mut self) -> Option<PreviewUrl> {
        self.file_name = None;
        self.server_ref = None;
        self.preview.take()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSession {
    step: WorkflowStep,
    user: PhotoSlot,
    clothing: PhotoSlot,
    progress: u8,
    result: Option<String>,
}

impl Default for WorkflowSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowSession {
    pub fn new() -> Self {
        Self {
            step: WorkflowStep::SelectUser,
            user: PhotoSlot::default(),
            clothing: PhotoSlot::default(),
            progress: 0,
            result: None,
        }
    }

    pub fn step(&self) -> WorkflowStep {
        self.step
    }

    pub fn user(&self) -> &PhotoSlot {
        &self.user
    }

    pub fn clothing(&self) -> &PhotoSlot {
        &self.clothing
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn select_user_photo(
        &mut self,
        file_name: String,
        preview: PreviewUrl,
    ) -> Option<PreviewUrl> {
        self.user.select(file_name, preview)
    }

    pub fn select_clothing_photo(
        &mut self,
        file_name: String,
        preview: PreviewUrl,
    ) -> Option<PreviewUrl> {
        self.clothing.select(file_name, preview)
    }

    /// Record the durable URL for the user photo. Ignored if the slot was
    /// cleared while the upload was in flight.
    pub fn set_user_server_ref(&mut self, url: String) {
        if self.user.is_picked() {
            self.user.server_ref = Some(url);
        }
    }

    pub fn set_clothing_server_ref(&mut self, url: String) {
        if self.clothing.is_picked() {
            self.clothing.server_ref = Some(url);
        }
    }

    pub fn clear_user_photo(&mut self) -> Option<PreviewUrl> {
        self.user.clear()
    }

    pub fn clear_clothing_photo(&mut self) -> Option<PreviewUrl> {
        self.clothing.clear()
    }

    /// Whether the primary action is available on the current step.
    pub fn can_advance(&self) -> bool {
        match self.step {
            WorkflowStep::SelectUser => self.user.is_picked(),
            WorkflowStep::SelectClothing => self.clothing.is_picked(),
            WorkflowStep::Processing | WorkflowStep::Result => false,
        }
    }

    /// `SelectUser -> SelectClothing`. No network traffic involved.
    pub fn advance_to_clothing(&mut self) -> bool {
        if self.step == WorkflowStep::SelectUser && self.user.is_picked() {
            self.step = WorkflowStep::SelectClothing;
            true
        } else {
            false
        }
    }

    /// `SelectClothing -> SelectUser`, keeping the user photo intact.
    pub fn back_to_user(&mut self) -> bool {
        if self.step == WorkflowStep::SelectClothing {
            self.step = WorkflowStep::SelectUser;
            true
        } else {
            false
        }
    }

    /// `SelectClothing -> Processing`. Both durable references must exist:
    /// an eager upload may still be in flight, in which case the caller
    /// should tell the user to wait rather than submit half a request.
    pub fn begin_processing(&mut self) -> Result<(), NotReady> {
        if self.step != WorkflowStep::SelectClothing || !self.clothing.is_picked() {
            return Err(NotReady::NoClothingPhoto);
        }
        if self.user.server_ref.is_none() || self.clothing.server_ref.is_none() {
            return Err(NotReady::UploadPending);
        }
        self.step = WorkflowStep::Processing;
        self.progress = 0;
        Ok(())
    }

    /// Advance the cosmetic progress indicator. Display only: it carries no
    /// information about the real request.
    pub fn tick_progress(&mut self, increment: u8) {
        if self.step == WorkflowStep::Processing {
            self.progress = self.progress.saturating_add(increment).min(100);
        }
    }

    /// `Processing -> Result`. Progress is forced to 100 before the step
    /// changes hands.
    pub fn complete(&mut self, result_url: String) -> bool {
        if self.step != WorkflowStep::Processing {
            return false;
        }
        self.progress = 100;
        self.result = Some(result_url);
        self.step = WorkflowStep::Result;
        true
    }

    /// Processing failed: tear the whole session down to `SelectUser`.
    /// Returns every outstanding preview handle for revocation.
    pub fn fail(&mut self) -> Vec<PreviewUrl> {
        self.reset()
    }

    /// `Result -> SelectClothing`, keeping the uploaded user photo.
    pub fn try_another_clothing(&mut self) -> Option<PreviewUrl> {
        if self.step != WorkflowStep::Result {
            return None;
        }
        self.result = None;
        self.progress = 0;
        self.step = WorkflowStep::SelectClothing;
        self.clothing.clear()
    }

    /// Discard everything and return to `SelectUser`.
    pub fn start_over(&mut self) -> Vec<PreviewUrl> {
        self.reset()
    }

    fn reset(&mut self) -> Vec<PreviewUrl> {
        let handles = [self.user.clear(), self.clothing.clear()]
            .into_iter()
            .flatten()
            .collect();
        self.result = None;
        self.progress = 0;
        self.step = WorkflowStep::SelectUser;
        handles
    }
}

/// Why `begin_processing` refused to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotReady {
    NoClothingPhoto,
    UploadPending,
}
