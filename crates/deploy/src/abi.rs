//! Bindings of the contracts the harness deploys and drives.
//!
//! The contracts are built elsewhere, their bytecode is read from the artifacts directory.

use alloy_sol_types::sol;

sol!(
    #[sol(rpc)]
    #[derive(Debug)]
    contract FundMe {
        constructor(address _priceFeed);

        function fund() public payable;
        function withdraw() public;
        function getEntranceFee() public view returns (uint256);
        function getPrice() public view returns (int256);
        function addressToAmountFunded(address funder) public view returns (uint256);
        function owner() public view returns (address);
    }
);

sol!(
    #[sol(rpc)]
    #[derive(Debug)]
    contract MockV3Aggregator {
        constructor(uint8 _decimals, int256 _initialAnswer);

        function decimals() public view returns (uint8);
        function latestAnswer() public view returns (int256);
        function updateAnswer(int256 _answer) public;
    }
);
