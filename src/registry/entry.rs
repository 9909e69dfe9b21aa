use alloc::borrow::Cow;
use core::any::TypeId;

/// A registered error code together with its description and detail type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeEntry {
    pub(crate) code: Cow<'static, str>,
    pub(crate) description: Cow<'static, str>,
    pub(crate) detail_type_id: TypeId,
    pub(crate) detail_type_name: &'static str,
}

impl CodeEntry {
    pub(crate) fn of<D: 'static>(
        code: Cow<'static, str>,
        description: Cow<'static, str>,
    ) -> Self {
        Self {
            code,
            description,
            detail_type_id: TypeId::of::<D>(),
            detail_type_name: core::any::type_name::<D>(),
        }
    }

    /// The error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The human-readable description given at registration.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The [`TypeId`] of the detail type occurrences must carry.
    #[must_use]
    pub fn detail_type_id(&self) -> TypeId {
        self.detail_type_id
    }

    /// The name of the detail type occurrences must carry, as reported by
    /// [`core::any::type_name`].
    #[must_use]
    pub fn detail_type_name(&self) -> &'static str {
        self.detail_type_name
    }

    /// Returns whether errors under this code carry details of type `D`.
    #[must_use]
    pub fn accepts<D: 'static>(&self) -> bool {
        self.detail_type_id == TypeId::of::<D>()
    }
}
