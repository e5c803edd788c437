mod ascii_tests;
