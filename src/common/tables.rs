use std::sync::LazyLock;

// Per version and error correction level block layout
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct EccInfo {
    pub total_data_codewords: usize,
    pub ecc_per_block: usize,
    pub blocks_in_group1: usize,
    pub codewords_in_group1: usize,
    pub blocks_in_group2: usize,
    pub codewords_in_group2: usize,
}

impl EccInfo {
    // Group 2 blocks carry exactly one data codeword more than group 1 blocks, and only
    // exist when the data codewords don't divide evenly among the blocks
    fn derive(total_codewords: usize, ecc_per_block: usize, block_count: usize) -> Self {
        let total_data_codewords = total_codewords - ecc_per_block * block_count;
        let short_len = total_data_codewords / block_count;
        let long_count = total_data_codewords % block_count;
        let (blocks_in_group2, codewords_in_group2) =
            if long_count == 0 { (0, 0) } else { (long_count, short_len + 1) };

        Self {
            total_data_codewords,
            ecc_per_block,
            blocks_in_group1: block_count - long_count,
            codewords_in_group1: short_len,
            blocks_in_group2,
            codewords_in_group2,
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks_in_group1 + self.blocks_in_group2
    }
}

// Indexed by [version - 1][ec level index]
pub static ECC_INFO: LazyLock<[[EccInfo; 4]; 40]> = LazyLock::new(|| {
    std::array::from_fn(|v| {
        std::array::from_fn(|e| {
            EccInfo::derive(
                TOTAL_CODEWORDS[v] as usize,
                ECC_CODEWORDS_PER_BLOCK[e][v] as usize,
                ECC_BLOCK_COUNT[e][v] as usize,
            )
        })
    })
});

// Alignment pattern centers, shared by both axes. Empty for version 1
//------------------------------------------------------------------------------

pub static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

// Zero bits appended after the interleaved codewords
pub static REMAINDER_BITS: [usize; 40] = [
    0, 7, 7, 7, 7, 7, 0, 0, 0, 0, 0, 0, 0, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 3, 3, 3, 3, 3,
    3, 3, 0, 0, 0, 0, 0, 0,
];

// Data + ecc codewords in the whole symbol
pub static TOTAL_CODEWORDS: [u16; 40] = [
    26, 44, 70, 100, 134, 172, 196, 242, 292, 346, 404, 466, 532, 581, 655, 733, 815, 901, 991,
    1085, 1156, 1258, 1364, 1474, 1588, 1706, 1828, 1921, 2051, 2185, 2323, 2465, 2611, 2761, 2876,
    3034, 3196, 3362, 3532, 3706,
];

#[rustfmt::skip]
static ECC_CODEWORDS_PER_BLOCK: [[u8; 40]; 4] = [
    [ // L
         7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28,
        28, 28, 30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [ // M
        10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26,
        26, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    [ // Q
        13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30,
        28, 30, 30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [ // H
        17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28,
        30, 24, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

#[rustfmt::skip]
static ECC_BLOCK_COUNT: [[u8; 40]; 4] = [
    [ // L
         1,  1,  1,  1,  1,  2,  2,  2,  2,  4,  4,  4,  4,  4,  6,  6,  6,  6,  7,  8,
         8,  9,  9, 10, 12, 12, 12, 13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [ // M
         1,  1,  1,  2,  2,  4,  4,  4,  5,  5,  5,  8,  9,  9, 10, 10, 11, 13, 14, 16,
        17, 17, 18, 20, 21, 23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [ // Q
         1,  1,  2,  2,  4,  4,  6,  6,  8,  8,  8, 10, 12, 16, 12, 17, 16, 18, 21, 20,
        23, 23, 25, 27, 29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [ // H
         1,  1,  2,  4,  4,  4,  5,  6,  8,  8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25,
        25, 34, 30, 32, 35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];

// Max input characters (bytes in byte mode), indexed by [ec level index][mode index][version - 1]
//------------------------------------------------------------------------------

#[rustfmt::skip]
pub static CHAR_CAPACITY: [[[u16; 40]; 3]; 4] = [
    [ // L
        [ // Numeric
              41,   77,  127,  187,  255,  322,  370,  461,  552,  652,
             772,  883, 1022, 1101, 1250, 1408, 1548, 1725, 1903, 2061,
            2232, 2409, 2620, 2812, 3057, 3283, 3517, 3669, 3909, 4158,
            4417, 4686, 4965, 5253, 5529, 5836, 6153, 6479, 6743, 7089,
        ],
        [ // Alphanumeric
              25,   47,   77,  114,  154,  195,  224,  279,  335,  395,
             468,  535,  619,  667,  758,  854,  938, 1046, 1153, 1249,
            1352, 1460, 1588, 1704, 1853, 1990, 2132, 2223, 2369, 2520,
            2677, 2840, 3009, 3183, 3351, 3537, 3729, 3927, 4087, 4296,
        ],
        [ // Byte
              17,   32,   53,   78,  106,  134,  154,  192,  230,  271,
             321,  367,  425,  458,  520,  586,  644,  718,  792,  858,
             929, 1003, 1091, 1171, 1273, 1367, 1465, 1528, 1628, 1732,
            1840, 1952, 2068, 2188, 2303, 2431, 2563, 2699, 2809, 2953,
        ],
    ],
    [ // M
        [ // Numeric
              34,   63,  101,  149,  202,  255,  293,  365,  432,  513,
             604,  691,  796,  871,  991, 1082, 1212, 1346, 1500, 1600,
            1708, 1872, 2059, 2188, 2395, 2544, 2701, 2857, 3035, 3289,
            3486, 3693, 3909, 4134, 4343, 4588, 4775, 5039, 5313, 5596,
        ],
        [ // Alphanumeric
              20,   38,   61,   90,  122,  154,  178,  221,  262,  311,
             366,  419,  483,  528,  600,  656,  734,  816,  909,  970,
            1035, 1134, 1248, 1326, 1451, 1542, 1637, 1732, 1839, 1994,
            2113, 2238, 2369, 2506, 2632, 2780, 2894, 3054, 3220, 3391,
        ],
        [ // Byte
              14,   26,   42,   62,   84,  106,  122,  152,  180,  213,
             251,  287,  331,  362,  412,  450,  504,  560,  624,  666,
             711,  779,  857,  911,  997, 1059, 1125, 1190, 1264, 1370,
            1452, 1538, 1628, 1722, 1809, 1911, 1989, 2099, 2213, 2331,
        ],
    ],
    [ // Q
        [ // Numeric
              27,   48,   77,  111,  144,  178,  207,  259,  312,  364,
             427,  489,  580,  621,  703,  775,  876,  948, 1063, 1159,
            1224, 1358, 1468, 1588, 1718, 1804, 1933, 2085, 2181, 2358,
            2473, 2670, 2805, 2949, 3081, 3244, 3417, 3599, 3791, 3993,
        ],
        [ // Alphanumeric
              16,   29,   47,   67,   87,  108,  125,  157,  189,  221,
             259,  296,  352,  376,  426,  470,  531,  574,  644,  702,
             742,  823,  890,  963, 1041, 1094, 1172, 1263, 1322, 1429,
            1499, 1618, 1700, 1787, 1867, 1966, 2071, 2181, 2298, 2420,
        ],
        [ // Byte
              11,   20,   32,   46,   60,   74,   86,  108,  130,  151,
             177,  203,  241,  258,  292,  322,  364,  394,  442,  482,
             509,  565,  611,  661,  715,  751,  805,  868,  908,  982,
            1030, 1112, 1168, 1228, 1283, 1351, 1423, 1499, 1579, 1663,
        ],
    ],
    [ // H
        [ // Numeric
              17,   34,   58,   82,  106,  139,  154,  202,  235,  288,
             331,  374,  427,  468,  530,  602,  674,  746,  813,  919,
             969, 1056, 1108, 1228, 1286, 1425, 1501, 1581, 1677, 1782,
            1897, 2022, 2157, 2301, 2361, 2524, 2625, 2735, 2927, 3057,
        ],
        [ // Alphanumeric
              10,   20,   35,   50,   64,   84,   93,  122,  143,  174,
             200,  227,  259,  283,  321,  365,  408,  452,  493,  557,
             587,  640,  672,  744,  779,  864,  910,  958, 1016, 1080,
            1150, 1226, 1307, 1394, 1431, 1530, 1591, 1658, 1774, 1852,
        ],
        [ // Byte
               7,   14,   24,   34,   44,   58,   64,   84,   98,  119,
             137,  155,  177,  194,  220,  250,  280,  310,  338,  382,
             403,  439,  461,  511,  535,  593,  625,  658,  698,  742,
             790,  842,  898,  958,  983, 1051, 1093, 1139, 1219, 1273,
        ],
    ],
];

#[cfg(test)]
mod table_tests {
    use test_case::test_case;

    use super::{EccInfo, ECC_INFO, REMAINDER_BITS, TOTAL_CODEWORDS};

    #[test_case(1, 0, EccInfo { total_data_codewords: 19, ecc_per_block: 7, blocks_in_group1: 1, codewords_in_group1: 19, blocks_in_group2: 0, codewords_in_group2: 0 })]
    #[test_case(1, 3, EccInfo { total_data_codewords: 9, ecc_per_block: 17, blocks_in_group1: 1, codewords_in_group1: 9, blocks_in_group2: 0, codewords_in_group2: 0 })]
    #[test_case(5, 2, EccInfo { total_data_codewords: 62, ecc_per_block: 18, blocks_in_group1: 2, codewords_in_group1: 15, blocks_in_group2: 2, codewords_in_group2: 16 })]
    #[test_case(40, 3, EccInfo { total_data_codewords: 1276, ecc_per_block: 30, blocks_in_group1: 20, codewords_in_group1: 15, blocks_in_group2: 61, codewords_in_group2: 16 })]
    fn test_ecc_info(version: usize, ecl_index: usize, exp: EccInfo) {
        assert_eq!(ECC_INFO[version - 1][ecl_index], exp);
    }

    #[test]
    fn test_ecc_info_covers_all_codewords() {
        for (v, infos) in ECC_INFO.iter().enumerate() {
            for info in infos {
                let data = info.blocks_in_group1 * info.codewords_in_group1
                    + info.blocks_in_group2 * info.codewords_in_group2;
                assert_eq!(data, info.total_data_codewords);
                let ecc = info.block_count() * info.ecc_per_block;
                assert_eq!(data + ecc, TOTAL_CODEWORDS[v] as usize);
            }
        }
    }

    #[test]
    fn test_remainder_bits() {
        assert_eq!(REMAINDER_BITS[0], 0);
        assert_eq!(REMAINDER_BITS[1], 7);
        assert_eq!(REMAINDER_BITS[13], 3);
        assert_eq!(REMAINDER_BITS[20], 4);
        assert_eq!(REMAINDER_BITS[39], 0);
    }
}
