//! Mode register tables for the S5K3L6, 24 MHz reference clock and four CSI-2 lanes.

use crate::s5k3l6::program::{RegisterProgram, RegisterValue, REG_NULL};

/// 4208x3120 at 30 fps, 600 MHz link frequency.
pub static MODE_4208X3120_30FPS: RegisterProgram = RegisterProgram::new(MODE_4208X3120_REGS);

/// 2104x1560 at 30 fps (2x2 binned), 284 MHz link frequency.
pub static MODE_2104X1560_30FPS: RegisterProgram = RegisterProgram::new(MODE_2104X1560_REGS);

const MODE_4208X3120_REGS: &[RegisterValue] = &[
    RegisterValue::new(0x0000, 0x0060),
    RegisterValue::new(0x0000, 0x30C6),
    RegisterValue::new(0x0A02, 0x3400),
    RegisterValue::new(0x3084, 0x1314),
    RegisterValue::new(0x3266, 0x0001),
    RegisterValue::new(0x3242, 0x2020),
    RegisterValue::new(0x306A, 0x2F4C),
    RegisterValue::new(0x306C, 0xCA01),
    RegisterValue::new(0x307A, 0x0D20),
    RegisterValue::new(0x309E, 0x002D),
    RegisterValue::new(0x3072, 0x0013),
    RegisterValue::new(0x3074, 0x0977),
    RegisterValue::new(0x3076, 0x9411),
    RegisterValue::new(0x3024, 0x0016),
    RegisterValue::new(0x3070, 0x3D00),
    RegisterValue::new(0x3002, 0x0E00),
    RegisterValue::new(0x3006, 0x1000),
    RegisterValue::new(0x300A, 0x0C00),
    RegisterValue::new(0x3010, 0x0400),
    RegisterValue::new(0x3018, 0xC500),
    RegisterValue::new(0x303A, 0x0204),
    RegisterValue::new(0x3452, 0x0001),
    RegisterValue::new(0x3454, 0x0001),
    RegisterValue::new(0x3456, 0x0001),
    RegisterValue::new(0x3458, 0x0001),
    RegisterValue::new(0x345A, 0x0002),
    RegisterValue::new(0x345C, 0x0014),
    RegisterValue::new(0x345E, 0x0002),
    RegisterValue::new(0x3460, 0x0014),
    RegisterValue::new(0x3464, 0x0006),
    RegisterValue::new(0x3466, 0x0012),
    RegisterValue::new(0x3468, 0x0012),
    RegisterValue::new(0x346A, 0x0012),
    RegisterValue::new(0x346C, 0x0012),
    RegisterValue::new(0x346E, 0x0012),
    RegisterValue::new(0x3470, 0x0012),
    RegisterValue::new(0x3472, 0x0008),
    RegisterValue::new(0x3474, 0x0004),
    RegisterValue::new(0x3476, 0x0044),
    RegisterValue::new(0x3478, 0x0004),
    RegisterValue::new(0x347A, 0x0044),
    RegisterValue::new(0x347E, 0x0006),
    RegisterValue::new(0x3480, 0x0010),
    RegisterValue::new(0x3482, 0x0010),
    RegisterValue::new(0x3484, 0x0010),
    RegisterValue::new(0x3486, 0x0010),
    RegisterValue::new(0x3488, 0x0010),
    RegisterValue::new(0x348A, 0x0010),
    RegisterValue::new(0x348E, 0x000C),
    RegisterValue::new(0x3490, 0x004C),
    RegisterValue::new(0x3492, 0x000C),
    RegisterValue::new(0x3494, 0x004C),
    RegisterValue::new(0x3496, 0x0020),
    RegisterValue::new(0x3498, 0x0006),
    RegisterValue::new(0x349A, 0x0008),
    RegisterValue::new(0x349C, 0x0008),
    RegisterValue::new(0x349E, 0x0008),
    RegisterValue::new(0x34A0, 0x0008),
    RegisterValue::new(0x34A2, 0x0008),
    RegisterValue::new(0x34A4, 0x0008),
    RegisterValue::new(0x34A8, 0x001A),
    RegisterValue::new(0x34AA, 0x002A),
    RegisterValue::new(0x34AC, 0x001A),
    RegisterValue::new(0x34AE, 0x002A),
    RegisterValue::new(0x34B0, 0x0080),
    RegisterValue::new(0x34B2, 0x0006),
    RegisterValue::new(0x32A2, 0x0000),
    RegisterValue::new(0x32A4, 0x0000),
    RegisterValue::new(0x32A6, 0x0000),
    RegisterValue::new(0x32A8, 0x0000),
    RegisterValue::new(0x0344, 0x0008),
    RegisterValue::new(0x0346, 0x0008),
    RegisterValue::new(0x0348, 0x1077),
    RegisterValue::new(0x034A, 0x0C37),
    RegisterValue::new(0x034C, 0x1070),
    RegisterValue::new(0x034E, 0x0C30),
    RegisterValue::new(0x0900, 0x0000),
    RegisterValue::new(0x0380, 0x0001),
    RegisterValue::new(0x0382, 0x0001),
    RegisterValue::new(0x0384, 0x0001),
    RegisterValue::new(0x0386, 0x0001),
    RegisterValue::new(0x0114, 0x0330),
    RegisterValue::new(0x0110, 0x0002),
    RegisterValue::new(0x0136, 0x1800),
    RegisterValue::new(0x0304, 0x0004),
    RegisterValue::new(0x0306, 0x0078),
    RegisterValue::new(0x3C1E, 0x0000),
    RegisterValue::new(0x030C, 0x0004),
    RegisterValue::new(0x030E, 0x0064),
    RegisterValue::new(0x3C16, 0x0000),
    RegisterValue::new(0x0300, 0x0006),
    RegisterValue::new(0x0342, 0x1320),
    RegisterValue::new(0x0340, 0x0CBC),
    RegisterValue::new(0x38C4, 0x0009),
    RegisterValue::new(0x38D8, 0x002A),
    RegisterValue::new(0x38DA, 0x000A),
    RegisterValue::new(0x38DC, 0x000B),
    RegisterValue::new(0x38C2, 0x000A),
    RegisterValue::new(0x38C0, 0x000F),
    RegisterValue::new(0x38D6, 0x000A),
    RegisterValue::new(0x38D4, 0x0009),
    RegisterValue::new(0x38B0, 0x000F),
    RegisterValue::new(0x3932, 0x1000),
    RegisterValue::new(0x3934, 0x0180),
    RegisterValue::new(0x3938, 0x000C),
    RegisterValue::new(0x0820, 0x04B0),
    RegisterValue::new(0x380C, 0x0090),
    RegisterValue::new(0x3064, 0xEFCF),
    RegisterValue::new(0x309C, 0x0640),
    RegisterValue::new(0x3090, 0x8800),
    RegisterValue::new(0x3238, 0x000C),
    RegisterValue::new(0x314A, 0x5F00),
    RegisterValue::new(0x32B2, 0x0000),
    RegisterValue::new(0x32B4, 0x0000),
    RegisterValue::new(0x32B6, 0x0000),
    RegisterValue::new(0x32B8, 0x0000),
    RegisterValue::new(0x3300, 0x0000),
    RegisterValue::new(0x3400, 0x0000),
    RegisterValue::new(0x3402, 0x4E42),
    RegisterValue::new(0x32B2, 0x0006),
    RegisterValue::new(0x32B4, 0x0006),
    RegisterValue::new(0x32B6, 0x0006),
    RegisterValue::new(0x32B8, 0x0006),
    RegisterValue::new(0x3C34, 0x0008),
    RegisterValue::new(0x3C36, 0x0000),
    RegisterValue::new(0x3C38, 0x0000),
    RegisterValue::new(0x393E, 0x4000),
    RegisterValue::new(REG_NULL, 0x0000),
];

const MODE_2104X1560_REGS: &[RegisterValue] = &[
    RegisterValue::new(0x0000, 0x0050),
    RegisterValue::new(0x0000, 0x30C6),
    RegisterValue::new(0x0A02, 0x3400),
    RegisterValue::new(0x3084, 0x1314),
    RegisterValue::new(0x3266, 0x0001),
    RegisterValue::new(0x3242, 0x2020),
    RegisterValue::new(0x306A, 0x2F4C),
    RegisterValue::new(0x306C, 0xCA01),
    RegisterValue::new(0x307A, 0x0D20),
    RegisterValue::new(0x309E, 0x002D),
    RegisterValue::new(0x3072, 0x0013),
    RegisterValue::new(0x3074, 0x0977),
    RegisterValue::new(0x3076, 0x9411),
    RegisterValue::new(0x3024, 0x0016),
    RegisterValue::new(0x3070, 0x3D00),
    RegisterValue::new(0x3002, 0x0E00),
    RegisterValue::new(0x3006, 0x1000),
    RegisterValue::new(0x300A, 0x0C00),
    RegisterValue::new(0x3010, 0x0400),
    RegisterValue::new(0x3018, 0xC500),
    RegisterValue::new(0x303A, 0x0204),
    RegisterValue::new(0x3452, 0x0001),
    RegisterValue::new(0x3454, 0x0001),
    RegisterValue::new(0x3456, 0x0001),
    RegisterValue::new(0x3458, 0x0001),
    RegisterValue::new(0x345A, 0x0002),
    RegisterValue::new(0x345C, 0x0014),
    RegisterValue::new(0x345E, 0x0002),
    RegisterValue::new(0x3460, 0x0014),
    RegisterValue::new(0x3464, 0x0006),
    RegisterValue::new(0x3466, 0x0012),
    RegisterValue::new(0x3468, 0x0012),
    RegisterValue::new(0x346A, 0x0012),
    RegisterValue::new(0x346C, 0x0012),
    RegisterValue::new(0x346E, 0x0012),
    RegisterValue::new(0x3470, 0x0012),
    RegisterValue::new(0x3472, 0x0008),
    RegisterValue::new(0x3474, 0x0004),
    RegisterValue::new(0x3476, 0x0044),
    RegisterValue::new(0x3478, 0x0004),
    RegisterValue::new(0x347A, 0x0044),
    RegisterValue::new(0x347E, 0x0006),
    RegisterValue::new(0x3480, 0x0010),
    RegisterValue::new(0x3482, 0x0010),
    RegisterValue::new(0x3484, 0x0010),
    RegisterValue::new(0x3486, 0x0010),
    RegisterValue::new(0x3488, 0x0010),
    RegisterValue::new(0x348A, 0x0010),
    RegisterValue::new(0x348E, 0x000C),
    RegisterValue::new(0x3490, 0x004C),
    RegisterValue::new(0x3492, 0x000C),
    RegisterValue::new(0x3494, 0x004C),
    RegisterValue::new(0x3496, 0x0020),
    RegisterValue::new(0x3498, 0x0006),
    RegisterValue::new(0x349A, 0x0008),
    RegisterValue::new(0x349C, 0x0008),
    RegisterValue::new(0x349E, 0x0008),
    RegisterValue::new(0x34A0, 0x0008),
    RegisterValue::new(0x34A2, 0x0008),
    RegisterValue::new(0x34A4, 0x0008),
    RegisterValue::new(0x34A8, 0x001A),
    RegisterValue::new(0x34AA, 0x002A),
    RegisterValue::new(0x34AC, 0x001A),
    RegisterValue::new(0x34AE, 0x002A),
    RegisterValue::new(0x34B0, 0x0080),
    RegisterValue::new(0x34B2, 0x0006),
    RegisterValue::new(0x32A2, 0x0000),
    RegisterValue::new(0x32A4, 0x0000),
    RegisterValue::new(0x32A6, 0x0000),
    RegisterValue::new(0x32A8, 0x0000),
    RegisterValue::new(0x3066, 0x7E00),
    RegisterValue::new(0x3004, 0x0800),
    RegisterValue::new(0x0344, 0x0008),
    RegisterValue::new(0x0346, 0x0008),
    RegisterValue::new(0x0348, 0x1077),
    RegisterValue::new(0x034A, 0x0C37),
    RegisterValue::new(0x034C, 0x0838),
    RegisterValue::new(0x034E, 0x0618),
    RegisterValue::new(0x0900, 0x0122),
    RegisterValue::new(0x0380, 0x0001),
    RegisterValue::new(0x0382, 0x0001),
    RegisterValue::new(0x0384, 0x0001),
    RegisterValue::new(0x0386, 0x0003),
    RegisterValue::new(0x0114, 0x0330),
    RegisterValue::new(0x0110, 0x0002),
    RegisterValue::new(0x0136, 0x1800),
    RegisterValue::new(0x0304, 0x0004),
    RegisterValue::new(0x0306, 0x0078),
    RegisterValue::new(0x3C1E, 0x0000),
    RegisterValue::new(0x030C, 0x0003),
    RegisterValue::new(0x030E, 0x0047),
    RegisterValue::new(0x3C16, 0x0001),
    RegisterValue::new(0x0300, 0x0006),
    RegisterValue::new(0x0342, 0x1320),
    RegisterValue::new(0x0340, 0x0CBC),
    RegisterValue::new(0x38C4, 0x0004),
    RegisterValue::new(0x38D8, 0x0011),
    RegisterValue::new(0x38DA, 0x0005),
    RegisterValue::new(0x38DC, 0x0005),
    RegisterValue::new(0x38C2, 0x0005),
    RegisterValue::new(0x38C0, 0x0004),
    RegisterValue::new(0x38D6, 0x0004),
    RegisterValue::new(0x38D4, 0x0004),
    RegisterValue::new(0x38B0, 0x0007),
    RegisterValue::new(0x3932, 0x1000),
    RegisterValue::new(0x3934, 0x0180),
    RegisterValue::new(0x3938, 0x000C),
    RegisterValue::new(0x0820, 0x0238),
    RegisterValue::new(0x380C, 0x0049),
    RegisterValue::new(0x3064, 0xFFCF),
    RegisterValue::new(0x309C, 0x0640),
    RegisterValue::new(0x3090, 0x8000),
    RegisterValue::new(0x3238, 0x000B),
    RegisterValue::new(0x314A, 0x5F02),
    RegisterValue::new(0x3300, 0x0000),
    RegisterValue::new(0x3400, 0x0000),
    RegisterValue::new(0x3402, 0x4E46),
    RegisterValue::new(0x32B2, 0x0008),
    RegisterValue::new(0x32B4, 0x0008),
    RegisterValue::new(0x32B6, 0x0008),
    RegisterValue::new(0x32B8, 0x0008),
    RegisterValue::new(0x3C34, 0x0048),
    RegisterValue::new(0x3C36, 0x3000),
    RegisterValue::new(0x3C38, 0x0020),
    RegisterValue::new(0x393E, 0x4000),
    RegisterValue::new(0x303A, 0x0204),
    RegisterValue::new(0x3034, 0x4B01),
    RegisterValue::new(0x3036, 0x0029),
    RegisterValue::new(0x3032, 0x4800),
    RegisterValue::new(0x320E, 0x049E),
    RegisterValue::new(REG_NULL, 0x0000),
];
