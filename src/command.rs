use std::ops::{BitOr, BitOrAssign};

/// Pilot inputs the lander understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Thrust,
    RollClockwise,
    RollCounterclockwise,
}

impl Command {
    pub const ALL: [Command; 3] = [
        Command::Thrust,
        Command::RollClockwise,
        Command::RollCounterclockwise,
    ];

    const fn bit(self) -> u8 {
        match self {
            Command::Thrust => 0b001,
            Command::RollClockwise => 0b010,
            Command::RollCounterclockwise => 0b100,
        }
    }
}

/// The set of commands held during one tick, stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CommandSet(u8);

impl CommandSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(0b111)
    }

    pub fn insert(&mut self, command: Command) {
        self.0 |= command.bit();
    }

    pub fn remove(&mut self, command: Command) {
        self.0 &= !command.bit();
    }

    #[must_use]
    pub fn with(mut self, command: Command) -> Self {
        self.insert(command);
        self
    }

    pub const fn contains(self, command: Command) -> bool {
        self.0 & command.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Command> {
        Command::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl From<Command> for CommandSet {
    fn from(command: Command) -> Self {
        Self(command.bit())
    }
}

impl FromIterator<Command> for CommandSet {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CommandSet::empty(), |set, command| set.with(command))
    }
}

impl BitOr for CommandSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<Command> for CommandSet {
    type Output = Self;

    fn bitor(self, rhs: Command) -> Self {
        self.with(rhs)
    }
}

impl BitOr for Command {
    type Output = CommandSet;

    fn bitor(self, rhs: Self) -> CommandSet {
        CommandSet::from(self).with(rhs)
    }
}

impl BitOrAssign<Command> for CommandSet {
    fn bitor_assign(&mut self, rhs: Command) {
        self.insert(rhs);
    }
}
