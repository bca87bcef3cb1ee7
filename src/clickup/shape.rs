//! Response Shaping
//!
//! Drops optional nested fields the user did not ask for. Shaping consumes
//! a response and returns the trimmed one; a missing field is never an
//! error, and applying the same includes twice changes nothing.

use super::models::{Folder, Folders, List, Space, Spaces, Team, Teams};

/// Fields kept on teams
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamIncludes {
    pub members: bool,
    pub roles: bool,
}

/// Fields kept on spaces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpaceIncludes {
    pub features: bool,
    pub statuses: bool,
}

/// Fields kept on folders. `list_statuses` only matters when `lists` is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderIncludes {
    pub lists: bool,
    pub list_statuses: bool,
}

pub trait Shape: Sized {
    type Includes;

    fn shape(self, includes: &Self::Includes) -> Self;
}

impl Shape for Team {
    type Includes = TeamIncludes;

    fn shape(mut self, includes: &TeamIncludes) -> Self {
        if !includes.members {
            self.members = None;
        }
        if !includes.roles {
            self.roles = None;
        }
        self
    }
}

impl Shape for Space {
    type Includes = SpaceIncludes;

    fn shape(mut self, includes: &SpaceIncludes) -> Self {
        if !includes.features {
            self.features = None;
        }
        if !includes.statuses {
            self.statuses = None;
        }
        self
    }
}

impl Shape for Folder {
    type Includes = FolderIncludes;

    fn shape(mut self, includes: &FolderIncludes) -> Self {
        if !includes.lists {
            self.lists = None;
        } else if !includes.list_statuses {
            self.lists = self
                .lists
                .map(|lists| lists.into_iter().map(strip_statuses).collect());
        }
        self
    }
}

fn strip_statuses(mut list: List) -> List {
    list.statuses = None;
    list
}

impl Shape for Teams {
    type Includes = TeamIncludes;

    fn shape(mut self, includes: &TeamIncludes) -> Self {
        self.teams = self.teams.into_iter().map(|t| t.shape(includes)).collect();
        self
    }
}

impl Shape for Spaces {
    type Includes = SpaceIncludes;

    fn shape(mut self, includes: &SpaceIncludes) -> Self {
        self.spaces = self.spaces.into_iter().map(|s| s.shape(includes)).collect();
        self
    }
}

impl Shape for Folders {
    type Includes = FolderIncludes;

    fn shape(mut self, includes: &FolderIncludes) -> Self {
        self.folders = self.folders.into_iter().map(|f| f.shape(includes)).collect();
        self
    }
}
