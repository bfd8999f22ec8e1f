#[derive(Debug, Clone, PartialEq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    ToggleSimulation,
    AddProcess,
    Navigate(Direction),
    Kill(u64),
    KillTop,
    TriggerOverload,
    ClearAll,
    CycleSortMode,
    CycleAggregation,
    ToggleAutoKill,
    OptimizeResources,
    ToggleHelp,
    None,
}
