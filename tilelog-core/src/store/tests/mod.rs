mod request_store_tests;
