// Default templates written when a configuration file is missing.

pub const VEHICLES: &str = "\
; MyVehicles.ini sample format
; Each non-comment line: modelName, handlingId, carGroup, flags
infernus, HANDLING_SUPER, sport, 0x0
tahoma, HANDLING_SAL, sedan, 0x0
";

pub const ACTORS: &str = "\
; MyPeds.ini sample format
player, PLAYER, civilian, 0x0
gangb, GANG, gangB, 0x0
";

pub const VEHICLE_GROUPS: &str = "\
; MyCarGroups.ini sample
sports: infernus, bullet, cheetah
";

pub const ACTOR_GROUPS: &str = "\
; MyPedGroups.ini sample
gangs: gangb, gangc
";

pub const SOUNDS: &str = "\
; MySounds.ini sample
default: audio/train/default/sounds/
";
